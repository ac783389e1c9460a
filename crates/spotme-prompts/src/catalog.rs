//! Static prompt catalog

/// A themed category: prompts and narrations are picked independently
#[derive(Debug)]
pub struct Category {
    pub name: &'static str,
    pub prompts: &'static [&'static str],
    pub narrations: &'static [&'static str],
}

/// Presentation templates
pub const TEMPLATES: [&str; 3] = ["zoomOut", "zoomIn", "glitch"];

pub static CATEGORIES: [Category; 4] = [
    Category {
        name: "cursedMinecraft",
        prompts: &[
            "Steve with realistic human teeth smiling at camera",
            "Creeper but it's a grandma knitting a sweater",
            "Villager with bodybuilder muscles flexing",
            "Enderman wearing a business suit at office meeting",
            "Fat Pikachu made of Minecraft blocks eating diamonds",
            "Herobrine working at McDonald's drive-through",
            "Zombie pigman as a DJ at a nightclub",
            "Skeleton riding a unicycle in the desert",
            "Alex but she's 50 feet tall destroying a village",
            "Sheep with human face staring into your soul",
        ],
        narrations: &[
            "This Minecraft world looks completely normal... but look closer.",
            "Something is wrong with this village.",
            "POV: You logged into the wrong server.",
            "Day 47: The villagers are acting strange.",
        ],
    },
    Category {
        name: "oceanHorror",
        prompts: &[
            "Giant eye opening at the bottom of the ocean",
            "Diver discovering a massive underwater doorway",
            "Whale skeleton with glowing red eyes",
            "Submarine next to something impossibly large in the dark",
            "Deep sea fish but it has human hands",
            "Ancient temple ruins at the bottom of the Mariana Trench",
            "Megalodon shadow behind a small boat",
        ],
        narrations: &[
            "Scientists found this at 36,000 feet below.",
            "This is why we've only explored 5% of the ocean.",
            "The last thing the submarine camera recorded.",
            "They told us not to go deeper...",
        ],
    },
    Category {
        name: "monsterHybrid",
        prompts: &[
            "Pikachu mixed with Shrek",
            "SpongeBob but realistic and terrifying",
            "Mickey Mouse as a Dark Souls boss",
            "Thomas the Tank Engine with spider legs",
            "Elmo but he's 50 feet tall in a city",
            "Dora the Explorer as a Viking warrior",
            "Peppa Pig but photorealistic",
        ],
        narrations: &[
            "AI was asked to combine two characters...",
            "This shouldn't exist.",
            "My sleep paralysis demon be like:",
            "When you mix the wrong things together:",
        ],
    },
    Category {
        name: "spaceHorror",
        prompts: &[
            "Astronaut finding a door floating in space",
            "The sun with a human face watching Earth",
            "Planet made entirely of eyes",
            "Space station abandoned for 1000 years",
            "Black hole that looks like it's smiling",
        ],
        narrations: &[
            "NASA deleted this image.",
            "James Webb captured something it wasn't supposed to.",
            "This is 4 billion light years away... and it's moving closer.",
            "The universe is not empty.",
        ],
    },
];

pub fn find(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.name == name)
}

/// Category names in catalog order
pub fn names() -> Vec<&'static str> {
    CATEGORIES.iter().map(|category| category.name).collect()
}
