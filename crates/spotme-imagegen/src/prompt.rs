use strum::{AsRefStr, EnumIter, EnumString};

const TEXT_PLACEHOLDER: &str = "{TEXT}";

/// Billboard scene for deferred generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Scene {
    #[default]
    Nyc,
    Tokyo,
    London,
    Highway,
    Magazine,
}

impl Scene {
    /// Look up a scene by name, falling back to [`Scene::Nyc`]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub const fn template(self) -> &'static str {
        match self {
            Self::Nyc => {
                "A photorealistic Times Square at night in New York City. Massive digital billboards everywhere with neon lights, crowds of people, yellow taxis. One prominent billboard displays: \"{TEXT}\". The billboard should look real and integrated into the scene. Cinematic lighting, 8K quality."
            }
            Self::Tokyo => {
                "A photorealistic Shibuya Crossing in Tokyo at night. Giant LED screens and billboards covering buildings, crowds crossing the street, neon signs everywhere. One large billboard prominently displays: \"{TEXT}\". Cyberpunk aesthetic, rain-wet streets reflecting lights."
            }
            Self::London => {
                "A photorealistic Piccadilly Circus in London at night. Famous curved LED screens, red double-decker buses, crowds. One of the iconic digital billboards displays: \"{TEXT}\". Classic London atmosphere with modern digital advertising."
            }
            Self::Highway => {
                "A photorealistic American highway scene at sunset. A large roadside billboard on the side of the road displays: \"{TEXT}\". Open road, dramatic sky with orange and purple clouds, cars passing by. Cinematic wide shot."
            }
            Self::Magazine => {
                "A photorealistic high-end business magazine cover. Professional layout with \"{TEXT}\" as the cover headline. Sleek modern design, premium typography, glossy finish effect."
            }
        }
    }

    /// Scene template with the first `{TEXT}` replaced by `text`
    pub fn render(self, text: &str) -> String {
        self.template().replacen(TEXT_PLACEHOLDER, text, 1)
    }
}

/// Free-text prompt with the configured style suffix and optional caller style
pub fn styled_prompt(prompt: &str, style_suffix: &str, style: Option<&str>) -> String {
    format!("{prompt}. Style: {style_suffix} {}", style.unwrap_or_default())
}

/// Text part sent to the model
pub fn instruction(prompt: &str) -> String {
    format!("Generate an image: {prompt}")
}
