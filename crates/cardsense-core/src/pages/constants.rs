//! Shared layout constants for page components
//!
//! All pages target the portrait 240x320 display.

/// Horizontal margin between the screen edge and content
pub const PAGE_MARGIN_PX: u32 = 16;

/// Standard button height in pixels
pub const BUTTON_HEIGHT_PX: u32 = 36;

/// Standard button width in pixels
pub const BUTTON_WIDTH_PX: u32 = 180;

/// Gap between stacked buttons
pub const BUTTON_GAP_PX: u32 = 10;

/// Standard text row height for small/medium font in pixels
pub const TEXT_ROW_HEIGHT_PX: u32 = 20;

/// Row height for the compact contact lines on the card
pub const CONTACT_ROW_HEIGHT_PX: u32 = 14;

/// Page title row height in pixels (large font)
pub const TITLE_ROW_HEIGHT_PX: u32 = 30;

/// Top of the back button on sensor-driven pages
pub const BACK_BUTTON_TOP_PX: i32 = 268;

// Business card

/// Diameter of the circular avatar placeholder
pub const AVATAR_DIAMETER_PX: u32 = 88;

/// Top of the avatar circle
pub const AVATAR_TOP_PX: i32 = 16;

/// Width of the avatar ring
pub const AVATAR_RING_WIDTH_PX: u32 = 3;

/// Top of the name line
pub const NAME_TOP_PX: i32 = 112;

/// Top of the role line
pub const ROLE_TOP_PX: i32 = 136;

/// Top of the first contact line
pub const CONTACTS_TOP_PX: i32 = 160;

/// Top of the first navigation button
pub const CARD_BUTTONS_TOP_PX: i32 = 214;

// Sensor readout

/// Top of the first reading row
pub const READINGS_TOP_PX: i32 = 64;

/// Vertical distance between reading rows
pub const READING_ROW_STRIDE_PX: i32 = 28;

// Dice

/// Top of the light level caption
pub const DICE_CAPTION_TOP_PX: i32 = 40;

/// Edge length of the die
pub const DIE_SIZE_PX: u32 = 150;

/// Top of the die
pub const DIE_TOP_PX: i32 = 80;

/// Corner radius of the die body
pub const DIE_CORNER_RADIUS_PX: u32 = 18;

/// Diameter of one pip
pub const PIP_DIAMETER_PX: u32 = 24;

/// Distance from the die centre to an outer pip column/row
pub const PIP_SPACING_PX: i32 = 40;
