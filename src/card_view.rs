use iced::font::{Style as FontStyle, Weight};
use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Alignment, Background, Border, Color, Element, Font, Length, Shadow, Size, Theme};

use crate::domains::card::{CardRecord, COLORLESS_TONE};

pub const CARD_WIDTH: f32 = 300.0;

const MIN_WINDOW_HEIGHT: f32 = 360.0;
const MAX_WINDOW_HEIGHT: f32 = 760.0;
const CHARS_PER_LINE: usize = 38;
const LINE_HEIGHT: f32 = 18.0;

const NAMED_TONES: [(&str, [u8; 3]); 18] = [
    ("white", [255, 255, 255]),
    ("lightblue", [173, 216, 230]),
    ("gray", [190, 190, 190]),
    ("grey", [190, 190, 190]),
    ("lightcoral", [240, 128, 128]),
    ("palegreen", [152, 251, 152]),
    ("gold", [255, 215, 0]),
    ("silver", [192, 192, 192]),
    ("black", [0, 0, 0]),
    ("red", [255, 0, 0]),
    ("green", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("purple", [160, 32, 240]),
    ("orange", [255, 165, 0]),
    ("brown", [165, 42, 42]),
    ("pink", [255, 192, 203]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
];

/// Resolves a tone name (`"light coral"`, `"Purple"`, `"#aabbcc"`) to a color.
pub fn tone_color(tone: &str) -> Option<Color> {
    let trimmed = tone.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex);
    }
    let key: String = trimmed
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    NAMED_TONES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, [r, g, b])| Color::from_rgb8(*r, *g, *b))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Background for a card; unknown tone names fall back to the colorless tone.
pub fn card_background(card: &CardRecord) -> Color {
    tone_color(&card.tone())
        .or_else(|| tone_color(COLORLESS_TONE))
        .unwrap_or(Color::from_rgb8(192, 192, 192))
}

fn card_surface(background: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        text_color: Some(Color::BLACK),
        background: Some(Background::Color(background)),
        border: Border {
            radius: 10.0.into(),
            width: 2.0,
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.55),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

/// Grows with the wrapped rules and flavor text. Past the cap the face scrolls.
pub fn window_size(card: &CardRecord) -> Size {
    let wrapped = |body: &str| {
        body.lines()
            .map(|line| line.chars().count().div_ceil(CHARS_PER_LINE).max(1))
            .sum::<usize>()
    };
    let lines = wrapped(&card.text) + wrapped(&card.flavor_text);
    let height = (MIN_WINDOW_HEIGHT + lines as f32 * LINE_HEIGHT).min(MAX_WINDOW_HEIGHT);
    Size::new(CARD_WIDTH + 40.0, height)
}

pub fn view_card<'a, M: Clone + 'a>(card: &'a CardRecord, on_save: M) -> Element<'a, M> {
    let bold = Font {
        weight: Weight::Bold,
        ..Font::DEFAULT
    };
    let italic = Font {
        style: FontStyle::Italic,
        ..Font::DEFAULT
    };

    let mut face = column![
        text(card.name.as_str()).size(18).font(bold),
        container(text(card.mana_cost.as_str()).size(15))
            .width(Length::Fill)
            .align_x(Alignment::End),
        text(card.type_line()).size(15),
        text(card.text.as_str()).size(13).width(Length::Fill),
        text(card.flavor_text.as_str())
            .size(13)
            .font(italic)
            .width(Length::Fill),
    ]
    .spacing(8)
    .width(Length::Fill);

    if let Some(pt) = card.power_toughness() {
        face = face.push(
            container(text(pt).size(15).font(bold))
                .width(Length::Fill)
                .align_x(Alignment::End),
        );
    }

    let surface = container(face)
        .padding(10)
        .width(CARD_WIDTH)
        .style(card_surface(card_background(card)));

    column![
        scrollable(surface).height(Length::Fill),
        row![
            Space::new().width(Length::Fill),
            button(text("Save As…").size(13))
                .padding([6, 12])
                .style(button::secondary)
                .on_press(on_save),
        ]
        .width(CARD_WIDTH),
    ]
    .spacing(10)
    .padding(12)
    .into()
}
