//! Turns the free-text completion reply into structured fields.
//!
//! Parsing never fails: every field is either read from the reply
//! (`Extracted::Found`) or replaced by its default (`Extracted::Defaulted`).

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::recommendation::{
    calculator::DEFAULT_NUTRITION_GOALS,
    defaults::{default_health_advice, default_menu_item, placeholder_calories},
    entities::{Extracted, MealSlot, NutritionGoals, RecommendedMenuItem},
};

const NUMBER: &str = r"(\d{1,3}(?:,\d{3})+|\d+)";

static CALORIES_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!(r"{NUMBER}[ \t]*(?:kcal|calories)")).ok());

static PROTEIN_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(r"{NUMBER}[ \t]*g[ \t]*(?:of[ \t]*)?protein")).ok()
});

static CARBS_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{NUMBER}[ \t]*g[ \t]*(?:of[ \t]*)?(?:carbs|carbohydrates)"
    ))
    .ok()
});

static FAT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!(r"{NUMBER}[ \t]*g[ \t]*(?:of[ \t]*)?fat")).ok());

// Label first: "Calories: 2,000", "Protein: 120g".
static LABELED_CALORIES_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!(r"calories[ \t]*[:\-][ \t]*{NUMBER}")).ok());

static LABELED_PROTEIN_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(r"protein[ \t]*[:\-][ \t]*{NUMBER}[ \t]*g")).ok()
});

static LABELED_CARBS_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:carbs|carbohydrates)[ \t]*[:\-][ \t]*{NUMBER}[ \t]*g"
    ))
    .ok()
});

static LABELED_FAT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!(r"fat[ \t]*[:\-][ \t]*{NUMBER}[ \t]*g")).ok());

/// A calorie mention inside a single menu line, with optional parentheses.
static MEAL_CALORIES_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\(?[ \t]*(?:~|approx\.?|about)?[ \t]*{NUMBER}[ \t]*(?:kcal|calories|cal)\b[ \t]*\)?"
    ))
    .ok()
});

const NUTRITION_HEADINGS: [&str; 5] = [
    "nutritional goals",
    "nutrition goals",
    "nutrition targets",
    "nutritional targets",
    "daily nutritional targets",
];

const MENU_HEADINGS: [&str; 3] = ["menu recommendations", "menu suggestions", "suggested menu"];

const ADVICE_HEADINGS: [&str; 4] = [
    "health advice",
    "general health advice",
    "general health recommendations",
    "recommendations:",
];

/// Structured content read from one completion reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    pub calories: Extracted<u32>,
    pub protein: Extracted<u32>,
    pub carbs: Extracted<u32>,
    pub fat: Extracted<u32>,
    /// Breakfast, lunch, dinner.
    pub menu_items: [Extracted<RecommendedMenuItem>; 3],
    pub health_advice: Extracted<String>,
}

impl ParsedReply {
    /// Found when at least one nutrient was read from the reply.
    pub fn nutrition_goals(&self) -> Extracted<NutritionGoals> {
        let goals = NutritionGoals::new(
            *self.calories.value(),
            *self.protein.value(),
            *self.carbs.value(),
            *self.fat.value(),
        );

        if [&self.calories, &self.protein, &self.carbs, &self.fat]
            .iter()
            .any(|field| field.is_found())
        {
            Extracted::Found(goals)
        } else {
            Extracted::Defaulted(goals)
        }
    }

    /// Nothing usable: every meal slot and the advice fell back to defaults.
    pub fn is_empty(&self) -> bool {
        self.menu_items.iter().all(Extracted::is_defaulted) && self.health_advice.is_defaulted()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Nutrition,
    Menu,
    Advice,
}

#[derive(Debug, Default)]
struct MealDraft {
    segments: Vec<String>,
}

struct ReplyParser {
    section: Section,
    active_slot: Option<MealSlot>,
    drafts: [Option<MealDraft>; 3],
    advice: Vec<String>,
}

pub fn parse_reply(reply: &str) -> ParsedReply {
    let mut parser = ReplyParser {
        section: Section::None,
        active_slot: None,
        drafts: [None, None, None],
        advice: Vec::new(),
    };

    for line in reply.lines() {
        parser.feed(line);
    }

    let lowered = reply.to_lowercase();
    let calories = extract_nutrient(
        &lowered,
        CALORIES_PATTERN.as_ref(),
        LABELED_CALORIES_PATTERN.as_ref(),
        DEFAULT_NUTRITION_GOALS.calories,
    );
    let protein = extract_nutrient(
        &lowered,
        PROTEIN_PATTERN.as_ref(),
        LABELED_PROTEIN_PATTERN.as_ref(),
        DEFAULT_NUTRITION_GOALS.protein,
    );
    let carbs = extract_nutrient(
        &lowered,
        CARBS_PATTERN.as_ref(),
        LABELED_CARBS_PATTERN.as_ref(),
        DEFAULT_NUTRITION_GOALS.carbs,
    );
    let fat = extract_nutrient(
        &lowered,
        FAT_PATTERN.as_ref(),
        LABELED_FAT_PATTERN.as_ref(),
        DEFAULT_NUTRITION_GOALS.fat,
    );

    let [breakfast, lunch, dinner] = parser.drafts;
    let menu_items = [
        build_menu_item(MealSlot::Breakfast, breakfast),
        build_menu_item(MealSlot::Lunch, lunch),
        build_menu_item(MealSlot::Dinner, dinner),
    ];

    let health_advice = if parser.advice.is_empty() {
        Extracted::Defaulted(default_health_advice())
    } else {
        Extracted::Found(parser.advice.join("\n"))
    };

    ParsedReply {
        calories,
        protein,
        carbs,
        fat,
        menu_items,
        health_advice,
    }
}

impl ReplyParser {
    fn feed(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        let dash_bullet = line.starts_with('-') || line.starts_with('•');
        let key = heading_key(line);

        if let Some(slot) = meal_header(&key) {
            self.active_slot = None;

            let draft = &mut self.drafts[slot.index()];
            // Only the first header per slot counts.
            if draft.is_none() {
                self.section = Section::Menu;
                let mut segments = Vec::new();
                if let Some((_, rest)) = line.split_once(':') {
                    let rest = rest.trim_matches(|c: char| c == '*' || c.is_whitespace());
                    if !rest.is_empty() {
                        segments.push(rest.to_string());
                    }
                }
                *draft = Some(MealDraft { segments });
                self.active_slot = Some(slot);
            }
            return;
        }

        // Bulleted lines are content even when they mention a heading phrase.
        if !dash_bullet {
            if NUTRITION_HEADINGS.iter().any(|h| key.contains(h)) {
                self.enter(Section::Nutrition);
                return;
            }
            // Checked before advice so "Menu Recommendations:" stays a menu heading.
            if MENU_HEADINGS.iter().any(|h| key.contains(h)) {
                self.enter(Section::Menu);
                return;
            }
            if ADVICE_HEADINGS.iter().any(|h| key.contains(h)) {
                self.enter(Section::Advice);
                return;
            }
        }

        match self.section {
            Section::Menu => self.push_menu_line(line),
            Section::Advice => self.push_advice_line(line),
            Section::Nutrition | Section::None => {}
        }
    }

    fn enter(&mut self, section: Section) {
        self.section = section;
        self.active_slot = None;
    }

    fn push_menu_line(&mut self, line: &str) {
        let Some(slot) = self.active_slot else {
            return;
        };
        let text = strip_bullet(line).unwrap_or(line).trim();
        if text.is_empty() {
            return;
        }
        if let Some(draft) = self.drafts[slot.index()].as_mut() {
            draft.segments.push(text.to_string());
        }
    }

    fn push_advice_line(&mut self, line: &str) {
        match strip_bullet(line) {
            Some(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    self.advice.push(format!("• {text}"));
                }
            }
            None => {
                if let Some(last) = self.advice.last_mut() {
                    last.push(' ');
                    last.push_str(line);
                }
            }
        }
    }
}

/// Lowercased line without markdown emphasis, heading marks, bullets or numbering.
fn heading_key(line: &str) -> String {
    let line = line.trim_start_matches(|c: char| {
        matches!(c, '#' | '*' | '-' | '•') || c.is_whitespace()
    });
    let line = strip_numbering(line).unwrap_or(line);
    line.replace('*', "").trim().to_lowercase()
}

fn meal_header(key: &str) -> Option<MealSlot> {
    MealSlot::ALL
        .into_iter()
        .find(|slot| key.starts_with(&format!("{}:", slot.category())))
}

/// Text after a `•`, `-` or `<n>.` / `<n>)` marker, or `None` when unmarked.
fn strip_bullet(line: &str) -> Option<&str> {
    line.strip_prefix('•')
        .or_else(|| line.strip_prefix('-'))
        .or_else(|| strip_numbering(line))
}

fn strip_numbering(line: &str) -> Option<&str> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    line[digits..]
        .strip_prefix('.')
        .or_else(|| line[digits..].strip_prefix(')'))
}

fn parse_number(raw: &str) -> Option<u32> {
    raw.replace(',', "").parse().ok()
}

fn first_positive(text: &str, pattern: Option<&Regex>) -> Option<u32> {
    pattern?.captures_iter(text).find_map(|captures| {
        captures
            .get(1)
            .and_then(|m| parse_number(m.as_str()))
            .filter(|value| *value > 0)
    })
}

fn extract_nutrient(
    text: &str,
    primary: Option<&Regex>,
    labeled: Option<&Regex>,
    default: u32,
) -> Extracted<u32> {
    match first_positive(text, primary).or_else(|| first_positive(text, labeled)) {
        Some(value) => Extracted::Found(value),
        None => Extracted::Defaulted(default),
    }
}

fn strip_calorie_mention(text: &str) -> String {
    let without = match MEAL_CALORIES_PATTERN.as_ref() {
        Some(pattern) => pattern.replace_all(text, "").into_owned(),
        None => text.to_string(),
    };
    without
        .replace("()", "")
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '–' | ',' | ':' | '*'))
        .to_string()
}

fn build_menu_item(slot: MealSlot, draft: Option<MealDraft>) -> Extracted<RecommendedMenuItem> {
    let Some(draft) = draft else {
        return Extracted::Defaulted(default_menu_item(slot));
    };

    let calories = MEAL_CALORIES_PATTERN
        .as_ref()
        .and_then(|pattern| {
            draft.segments.iter().find_map(|segment| {
                pattern
                    .captures(segment)
                    .and_then(|c| c.get(1))
                    .and_then(|m| parse_number(m.as_str()))
                    .filter(|value| *value > 0)
            })
        })
        .unwrap_or_else(|| placeholder_calories(slot));

    let mut texts = draft
        .segments
        .iter()
        .map(|segment| strip_calorie_mention(segment))
        .filter(|text| !text.is_empty());

    let Some(first) = texts.next() else {
        let mut item = default_menu_item(slot);
        item.calories = calories;
        return Extracted::Defaulted(item);
    };

    let (dish, inline_description) = match first
        .split_once(" - ")
        .or_else(|| first.split_once(" – "))
    {
        Some((dish, rest)) => (dish.trim().to_string(), Some(rest.trim().to_string())),
        None => (first.clone(), None),
    };

    let description = inline_description
        .into_iter()
        .chain(texts)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let description = if description.is_empty() {
        dish.clone()
    } else {
        description
    };

    Extracted::Found(RecommendedMenuItem::new(slot, &dish, calories, &description))
}
