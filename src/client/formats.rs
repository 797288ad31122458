// FormatSelector - shapes raw server formats into UI options
//
// Mirrors what the web UI shows: one automatic "Best Quality" entry first,
// then concrete video formats ranked by resolution, audio-only entries
// dropped, capped at 10 concrete rows.

use lazy_static::lazy_static;
use regex::Regex;

use super::display::format_file_size;
use super::models::{DisplayFormat, FormatDescriptor};

/// Maximum number of concrete formats offered, not counting the
/// synthetic best entry.
const MAX_CONCRETE_FORMATS: usize = 10;

pub struct FormatSelector;

impl FormatSelector {
    /// Build display options from raw formats.
    ///
    /// An empty input still yields the synthetic best entry, so the user can
    /// always download with automatic selection.
    pub fn select(formats: &[FormatDescriptor]) -> Vec<DisplayFormat> {
        let mut options = vec![Self::best_entry()];

        let mut video_formats: Vec<&FormatDescriptor> =
            formats.iter().filter(|f| f.has_video()).collect();

        // Stable sort keeps the server's order among equal qualities.
        video_formats.sort_by_key(|f| std::cmp::Reverse(Self::quality_rank(f)));

        for fmt in video_formats.into_iter().take(MAX_CONCRETE_FORMATS) {
            options.push(Self::concrete_entry(fmt));
        }

        options
    }

    /// The automatic-selection entry, always offered first.
    fn best_entry() -> DisplayFormat {
        DisplayFormat {
            label: "Best Quality".to_string(),
            size: String::new(),
            format_id: None,
            quality: "best".to_string(),
        }
    }

    fn concrete_entry(fmt: &FormatDescriptor) -> DisplayFormat {
        let quality = fmt.quality.as_deref().unwrap_or("Unknown");
        let ext = fmt.ext.as_deref().unwrap_or("mp4");

        DisplayFormat {
            label: format!("{} ({})", quality, ext.to_uppercase()),
            size: format_file_size(fmt.filesize),
            format_id: Some(fmt.format_id.clone()),
            quality: quality.to_string(),
        }
    }

    /// Numeric rank parsed from the quality label ("1080p" -> 1080).
    /// Labels without a leading number rank lowest.
    fn quality_rank(fmt: &FormatDescriptor) -> u32 {
        lazy_static! {
            static ref QUALITY_RE: Regex = Regex::new(r"^\s*(\d+)").unwrap();
        }

        fmt.quality
            .as_deref()
            .and_then(|q| QUALITY_RE.captures(q))
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    }
}
