//! Color roles and repair settings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_PACKET_SEARCH;
use crate::error::{CdgError, Result};

/// Palette indices grouped by the role they play in a karaoke screen.
///
/// The three sets are disjoint. Off colors must be background colors; on colors
/// must be primary or highlight colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
	primary: BTreeSet<u8>,
	highlight: BTreeSet<u8>,
	background: BTreeSet<u8>,
}

impl Default for Rules {
	/// Primary `{1}`, highlight `{10}`, background `{0}`.
	fn default() -> Self {
		Self {
			primary: BTreeSet::from([1]),
			highlight: BTreeSet::from([10]),
			background: BTreeSet::from([0]),
		}
	}
}

impl Rules {
	/// Creates a rules context from the three color roles.
	///
	/// # Errors
	///
	/// Returns [`CdgError::OverlappingColorRoles`] if an index appears in more than one set.
	pub fn new(
		primary: impl IntoIterator<Item = u8>,
		highlight: impl IntoIterator<Item = u8>,
		background: impl IntoIterator<Item = u8>,
	) -> Result<Self> {
		let rules = Self {
			primary: primary.into_iter().collect(),
			highlight: highlight.into_iter().collect(),
			background: background.into_iter().collect(),
		};
		rules.check_disjoint()?;
		Ok(rules)
	}

	/// Rejects rules whose roles share an index. Used after deserializing.
	///
	/// # Errors
	///
	/// Returns [`CdgError::OverlappingColorRoles`] with the first shared index.
	pub fn check_disjoint(&self) -> Result<()> {
		let shared = self
			.primary
			.intersection(&self.highlight)
			.chain(self.primary.intersection(&self.background))
			.chain(self.highlight.intersection(&self.background))
			.min();
		match shared {
			Some(&index) => Err(CdgError::OverlappingColorRoles {
				index,
			}),
			None => Ok(()),
		}
	}

	/// Main lyric colors.
	pub fn primary(&self) -> &BTreeSet<u8> {
		&self.primary
	}

	/// Sung-lyric colors.
	pub fn highlight(&self) -> &BTreeSet<u8> {
		&self.highlight
	}

	/// Background colors.
	pub fn background(&self) -> &BTreeSet<u8> {
		&self.background
	}

	/// Returns true if `index` is a primary color.
	pub fn is_primary(&self, index: u8) -> bool {
		self.primary.contains(&index)
	}

	/// Valid on colors, primary then highlight.
	pub fn on_colors(&self) -> Vec<u8> {
		self.primary.iter().chain(&self.highlight).copied().collect()
	}

	/// Valid off colors.
	pub fn off_colors(&self) -> Vec<u8> {
		self.background.iter().copied().collect()
	}
}

/// Which repairs run and how far neighbor lookups may scan.
///
/// # Presets
///
/// - `default()`: search 1000 packets, off color and location repair
/// - `strict()`: search 100 packets
/// - `lenient()`: search 5000 packets
///
/// # Examples
///
/// ```
/// use cdg_types::repair::RepairConfig;
///
/// let config = RepairConfig::lenient();
/// assert_eq!(config.search_limit, 5000);
/// assert!(!config.repair_on_color);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
	/// Maximum packets inspected past the starting point of a neighbor search
	pub search_limit: usize,
	/// Repair on colors outside the primary and highlight sets
	pub repair_on_color: bool,
	/// Repair off colors outside the background set
	pub repair_off_color: bool,
	/// Repair out-of-range rows and columns
	pub repair_location: bool,
}

impl Default for RepairConfig {
	fn default() -> Self {
		Self {
			search_limit: MAX_PACKET_SEARCH,
			repair_on_color: false,
			repair_off_color: true,
			repair_location: true,
		}
	}
}

impl RepairConfig {
	/// Create a configuration with a custom search limit and the default repairs.
	pub fn new(search_limit: usize) -> Self {
		Self {
			search_limit,
			..Self::default()
		}
	}

	/// Create a strict configuration: short neighbor searches.
	pub fn strict() -> Self {
		Self::new(100)
	}

	/// Create a lenient configuration: long neighbor searches.
	pub fn lenient() -> Self {
		Self::new(5000)
	}
}
