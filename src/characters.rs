use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub summary: String,
    pub battle_skill: i32,
    pub magic_skill: i32,
    pub charm_skill: i32,
    pub research_skill: i32,
    pub life_skill: i32,
    pub appearance_count: u32,
}

impl Character {
    /// Skill values in display order.
    pub fn skills(&self) -> [(Skill, i32); 5] {
        [
            (Skill::Battle, self.battle_skill),
            (Skill::Magic, self.magic_skill),
            (Skill::Charm, self.charm_skill),
            (Skill::Research, self.research_skill),
            (Skill::Life, self.life_skill),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skill {
    Battle,
    Magic,
    Charm,
    Research,
    Life,
}

impl Skill {
    pub fn label(self) -> &'static str {
        match self {
            Skill::Battle => "戰鬥技能",
            Skill::Magic => "魔法能力",
            Skill::Charm => "魅力值",
            Skill::Research => "研究能力",
            Skill::Life => "生活技能",
        }
    }
}

/// Display bucket for a skill value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillTier {
    Highest,
    High,
    Medium,
    Low,
}

impl SkillTier {
    pub fn css_class(self) -> &'static str {
        match self {
            SkillTier::Highest => "bg-red-500",
            SkillTier::High => "bg-orange-500",
            SkillTier::Medium => "bg-yellow-500",
            SkillTier::Low => "bg-gray-400",
        }
    }
}

/// Maps a skill value to its tier. Values outside 0..=100 are not clamped.
pub fn skill_tier(skill: i32) -> SkillTier {
    if skill >= 80 {
        SkillTier::Highest
    } else if skill >= 60 {
        SkillTier::High
    } else if skill >= 40 {
        SkillTier::Medium
    } else {
        SkillTier::Low
    }
}

// Placeholder results until a real analysis backend exists.
static MOCK_CHARACTERS: Lazy<Vec<Character>> = Lazy::new(|| {
    vec![
        Character {
            id: "1".to_string(),
            name: "主角".to_string(),
            summary: "故事的主要角色，擁有強大的戰鬥能力".to_string(),
            battle_skill: 85,
            magic_skill: 70,
            charm_skill: 60,
            research_skill: 45,
            life_skill: 55,
            appearance_count: 156,
        },
        Character {
            id: "2".to_string(),
            name: "女主角".to_string(),
            summary: "智慧型角色，精通魔法和研究".to_string(),
            battle_skill: 40,
            magic_skill: 95,
            charm_skill: 80,
            research_skill: 90,
            life_skill: 70,
            appearance_count: 98,
        },
    ]
});

pub fn mock_characters() -> Vec<Character> {
    MOCK_CHARACTERS.clone()
}
