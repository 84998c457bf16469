/// Compact number for bar captions (e.g., 2.1M, 450K, 7.5)
pub fn format_compact(value: f64) -> String {
    let abs_value = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs_value >= 1_000_000.0 {
        format!("{sign}{:.1}M", abs_value / 1_000_000.0)
    } else if abs_value >= 10_000.0 {
        format!("{sign}{:.0}K", abs_value / 1_000.0)
    } else if abs_value.fract() == 0.0 {
        format!("{sign}{abs_value:.0}")
    } else {
        format!("{sign}{abs_value:.1}")
    }
}

/// Shorten `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(2_100_000.0), "2.1M");
        assert_eq!(format_compact(450_000.0), "450K");
        assert_eq!(format_compact(1500.0), "1500");
        assert_eq!(format_compact(7.26), "7.3");
        assert_eq!(format_compact(-20.0), "-20");
    }

    #[test]
    fn test_truncate_is_char_aware() {
        assert_eq!(truncate("Impressão", 20), "Impressão");
        assert_eq!(truncate("Conversões Diretas", 6), "Conve…");
        assert_eq!(truncate("Impressão", 0), "");
    }
}
