//! Fixed sizes and offsets of the CD+G subchannel format.
//!
//! A CD+G stream is a flat sequence of 24-byte packets. Each packet is laid out as:
//!
//! | Offset | Size | Field         | Description                                   |
//! |--------|------|---------------|-----------------------------------------------|
//! | 0      | 1    | `command`     | `0x09` for graphics, `0x00` for timing frames |
//! | 1      | 1    | `instruction` | Instruction code, low 6 bits significant      |
//! | 2      | 2    | `parity_q`    | Unused by this decoder                        |
//! | 4      | 16   | `data`        | Instruction payload                           |
//! | 20     | 4    | `parity_p`    | Unused, left zero on encode                   |

/// Size of a packet in bytes
pub const PACKET_SIZE: usize = 24;

/// Size of the instruction payload in bytes
pub const PACKET_DATA_SIZE: usize = 16;

/// Offset of the command byte
pub const COMMAND_OFFSET: usize = 0;

/// Offset of the instruction byte
pub const INSTRUCTION_OFFSET: usize = 1;

/// Offset of the instruction payload
pub const PACKET_DATA_OFFSET: usize = 4;

/// Command marker for graphics instructions
pub const CDG_COMMAND: u8 = 0x09;

/// Command marker for timing (no-op) frames
pub const TIMING_COMMAND: u8 = 0x00;

/// Mask applied to the command, instruction and payload bytes
pub const SUBCODE_MASK: u8 = 0x3F;

/// Mask applied to palette index fields
pub const COLOR_INDEX_MASK: u8 = 0x0F;

/// Packets per CD sector
pub const PACKETS_PER_SECTOR: u64 = 4;

/// CD sectors per second of playback
pub const SECTORS_PER_SECOND: u64 = 75;

/// Packets per second of playback (one packet lasts 1/300 s)
pub const PACKETS_PER_SECOND: u64 = PACKETS_PER_SECTOR * SECTORS_PER_SECOND;

/// Width of the logical screen in pixels
pub const SCREEN_WIDTH: usize = 300;

/// Height of the logical screen in pixels
pub const SCREEN_HEIGHT: usize = 216;

/// Width of a tile in pixels
pub const TILE_WIDTH: usize = 6;

/// Height of a tile in pixels
pub const TILE_HEIGHT: usize = 12;

/// Number of tile columns on screen
pub const MAX_COLUMNS: usize = SCREEN_WIDTH / TILE_WIDTH;

/// Number of tile rows on screen
pub const MAX_ROWS: usize = SCREEN_HEIGHT / TILE_HEIGHT;

/// Number of palette entries
pub const COLOR_TABLE_SIZE: usize = 16;

/// Number of palette entries carried by one color table packet
pub const COLORS_PER_TABLE_PACKET: usize = 8;

/// Highest valid palette index
pub const MAX_COLOR_INDEX: u8 = (COLOR_TABLE_SIZE - 1) as u8;

/// Thickness of the left and right border in pixels
pub const BORDER_WIDTH: usize = TILE_WIDTH;

/// Thickness of the top and bottom border in pixels
pub const BORDER_HEIGHT: usize = TILE_HEIGHT;

/// Largest horizontal scroll offset in pixels
pub const MAX_HORIZONTAL_OFFSET: u8 = 5;

/// Largest vertical scroll offset in pixels
pub const MAX_VERTICAL_OFFSET: u8 = 11;

/// Default bound on neighbour searches in a packet sequence
pub const MAX_PACKET_SEARCH: usize = 1000;

/// File extensions accepted when opening a stream from disk (compared case-insensitively)
pub const CDG_EXTENSIONS: &[&str] = &["cdg"];
