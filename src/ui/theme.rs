use ratatui::style::Color;

// Primary colors
pub const ACCENT: Color = Color::Rgb(218, 118, 89); // warm orange
pub const SUCCESS: Color = Color::Rgb(134, 188, 111); // soft green
pub const WARNING: Color = Color::Rgb(229, 192, 123); // warm amber
pub const ERROR: Color = Color::Rgb(224, 108, 117); // soft red
pub const INFO: Color = Color::Rgb(139, 180, 250); // soft blue

// Text colors
pub const TEXT: Color = Color::Rgb(240, 240, 240);
pub const TEXT_SECONDARY: Color = Color::Rgb(180, 180, 180);
pub const TEXT_MUTED: Color = Color::Rgb(144, 144, 144);

// Background colors
pub const BG_BASE: Color = Color::Rgb(34, 34, 32);
pub const BG_INPUT: Color = Color::Rgb(58, 58, 56);

// Border colors
pub const BORDER: Color = Color::Rgb(66, 66, 64);
pub const BORDER_FOCUS: Color = Color::Rgb(218, 118, 89);

// Role colors in the chat transcript
pub const USER: Color = Color::Rgb(218, 118, 89);
pub const ASSISTANT: Color = Color::Rgb(180, 180, 180);
