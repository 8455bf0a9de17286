use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::borrow::Cow;

use crate::error::{CardForgeError, Result};

pub const MULTICOLOR_TONE: &str = "gold";
pub const COLORLESS_TONE: &str = "silver";

const COLOR_TONES: [(&str, &str); 5] = [
    ("white", "white"),
    ("blue", "light blue"),
    ("black", "gray"),
    ("red", "light coral"),
    ("green", "pale green"),
];

/// One generated card, exactly as it travels over the wire and sits on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub name: String,
    #[serde(default)]
    pub mana_cost: String,
    #[serde(default)]
    pub cmc: u32,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub subtypes: Vec<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<Number>,
    #[serde(default)]
    pub flavor_text: String,
}

impl CardRecord {
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text.trim())
            .map_err(|e| CardForgeError::MalformedReply(e.to_string()))
    }

    pub fn serialize(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CardForgeError::Serialization(e.to_string()))
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name)
    }

    pub fn tone(&self) -> Cow<'_, str> {
        background_tone(&self.colors)
    }

    pub fn type_line(&self) -> String {
        type_line(&self.types, &self.subtypes)
    }

    /// `None` when the card carries neither power nor toughness.
    pub fn power_toughness(&self) -> Option<String> {
        if self.power.is_none() && self.toughness.is_none() {
            return None;
        }
        let show = |value: &Option<Number>| {
            value
                .as_ref()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        Some(format!("{} / {}", show(&self.power), show(&self.toughness)))
    }
}

pub fn background_tone<S: AsRef<str>>(colors: &[S]) -> Cow<'_, str> {
    match colors {
        [] => Cow::Borrowed(COLORLESS_TONE),
        [single] => {
            let name = single.as_ref();
            let lower = name.to_lowercase();
            COLOR_TONES
                .iter()
                .find(|(color, _)| *color == lower)
                .map(|(_, tone)| Cow::Borrowed(*tone))
                .unwrap_or(Cow::Borrowed(name))
        }
        _ => Cow::Borrowed(MULTICOLOR_TONE),
    }
}

pub fn type_line<S: AsRef<str>>(types: &[S], subtypes: &[S]) -> String {
    if subtypes.is_empty() {
        return types
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
    }
    types
        .iter()
        .chain(subtypes.iter())
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Plain-text layout used by the command-line subcommands.
pub fn render_text(card: &CardRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  {}\n", card.name, card.mana_cost));
    out.push_str(&card.type_line());
    out.push('\n');
    if !card.text.is_empty() {
        out.push('\n');
        out.push_str(&card.text);
        out.push('\n');
    }
    if !card.flavor_text.is_empty() {
        out.push('\n');
        out.push_str(&format!("_{}_\n", card.flavor_text));
    }
    if let Some(pt) = card.power_toughness() {
        out.push_str(&format!("{pt:>40}\n"));
    }
    out.push_str(&format!("[{}]\n", card.tone()));
    out
}
