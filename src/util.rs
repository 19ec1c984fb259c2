use crate::options::Options;
use chrono::{Duration, NaiveDate};

/// ANSI SGR styling, a no-op when colorization is off.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub enabled: bool,
}

impl Style {
    pub fn sgr(&self, params: &str, content: &str) -> String {
        if !self.enabled {
            return content.to_string();
        }
        if content.ends_with("\x1b[m") {
            format!("\x1b[{params}m{content}")
        } else {
            format!("\x1b[{params}m{content}\x1b[m")
        }
    }

    pub fn bold(&self, s: &str) -> String {
        self.sgr("1", s)
    }
    pub fn dim(&self, s: &str) -> String {
        self.sgr("2", s)
    }
    pub fn red(&self, s: &str) -> String {
        self.sgr("31", s)
    }
    pub fn green(&self, s: &str) -> String {
        self.sgr("32", s)
    }
    pub fn yellow(&self, s: &str) -> String {
        self.sgr("33", s)
    }
    pub fn blue(&self, s: &str) -> String {
        self.sgr("34", s)
    }
}

fn is_printable(b: u8) -> bool {
    (32..=126).contains(&b)
}

/// Hex dump lines (without indentation) for `bytes`, capped at
/// `opts.max_dump()` with a trailing `...` line when truncated.
pub fn hex_dump(bytes: &[u8], opts: &Options) -> Vec<String> {
    let style = Style {
        enabled: opts.colorize,
    };
    let colorize_byte = |text: &str, b: u8| {
        if b == 0 {
            style.dim(&style.green(text))
        } else if is_printable(b) {
            style.yellow(text)
        } else {
            style.green(text)
        }
    };

    let per_line = opts.bytes_per_line.max(1);
    let shown = &bytes[..bytes.len().min(opts.max_dump())];
    let mut out = Vec::new();
    for chunk in shown.chunks(per_line) {
        let groups: Vec<String> = (0..per_line)
            .collect::<Vec<_>>()
            .chunks(4)
            .map(|idx| {
                idx.iter()
                    .map(|&i| match chunk.get(i) {
                        Some(&b) => colorize_byte(&format!("{b:02x}"), b),
                        None => "  ".to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| {
                let c = if is_printable(b) { (b as char).to_string() } else { ".".to_string() };
                colorize_byte(&c, b)
            })
            .collect();
        out.push(format!("{}   {}", groups.join("  "), ascii));
    }
    if bytes.len() > shown.len() {
        out.push("...".to_string());
    }
    out
}

/// Low `n` bits set.
pub fn mask(n: u32) -> u64 {
    if n >= 64 { u64::MAX } else { (1u64 << n) - 1 }
}

/// Seconds since 1904-01-01 00:00 UTC, rendered as a date.
pub fn format_time(secs: u64) -> String {
    let epoch = NaiveDate::from_ymd_opt(1904, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    let when = i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .zip(epoch)
        .and_then(|(d, e)| e.checked_add_signed(d));
    match when {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => secs.to_string(),
    }
}

/// Packed ISO-639-2/T code: three 5-bit letters offset by 0x60.
pub fn decode_language(code: u16) -> Option<String> {
    let letters = [(code >> 10) & 0x1f, (code >> 5) & 0x1f, code & 0x1f];
    if code >> 15 != 0 || letters.iter().any(|&c| !(1..=26).contains(&c)) {
        return None;
    }
    Some(letters.iter().map(|&c| (c as u8 + 0x60) as char).collect())
}

pub fn format_fraction(num: u64, den: u64) -> String {
    if den == 1 {
        num.to_string()
    } else {
        format!("{num}/{den}")
    }
}

pub fn format_size(width: impl std::fmt::Display, height: impl std::fmt::Display) -> String {
    format!("{width} x {height}")
}
