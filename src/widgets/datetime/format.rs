//! Luxon-style date/time patterns rendered with chrono.
//!
//! A pattern is scanned left to right. Text in single quotes is copied
//! verbatim, recognised tokens are replaced by the date component they
//! name and every other character is copied as-is. Tokens are tried in
//! table order and the first match wins, so longer spellings are listed
//! before their prefixes.

use std::fmt::{Display, Write};

use chrono::{DateTime, Datelike, TimeZone, Timelike};

use crate::widgets::text::process_escape_sequences;

/// Tokens chrono has no directive for.
#[derive(Debug, Clone, Copy)]
enum Computed {
    Millis3,
    Millis2,
    Millis1,
    Fraction1,
    Fraction2,
    Quarter,
    EraLetter,
    EraLong,
    EraShort,
}

const COMPUTED_TOKENS: &[(&str, Computed)] = &[
    ("SSS", Computed::Millis3),
    ("SS", Computed::Millis2),
    ("S", Computed::Millis1),
    ("uuu", Computed::Fraction1),
    ("uu", Computed::Fraction2),
    ("u", Computed::Fraction2),
    ("q", Computed::Quarter),
    ("GGGGG", Computed::EraLetter),
    ("GG", Computed::EraLong),
    ("G", Computed::EraShort),
];

const STRFTIME_TOKENS: &[(&str, &str)] = &[
    ("yyyyyy", "%Y"),
    ("yyyyy", "%Y"),
    ("yyyy", "%Y"),
    ("yy", "%y"),
    ("y", "%Y"),
    ("kkkk", "%G"),
    ("kk", "%g"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("LLLL", "%B"),
    ("LLL", "%b"),
    ("MM", "%m"),
    ("LL", "%m"),
    ("M", "%-m"),
    ("L", "%-m"),
    ("WW", "%V"),
    ("W", "%-V"),
    ("dd", "%d"),
    ("d", "%-d"),
    ("ooo", "%j"),
    ("o", "%-j"),
    ("EEEE", "%A"),
    ("cccc", "%A"),
    ("EEE", "%a"),
    ("ccc", "%a"),
    ("E", "%u"),
    ("c", "%u"),
    ("HH", "%H"),
    ("H", "%-H"),
    ("hh", "%I"),
    ("h", "%-I"),
    ("mm", "%M"),
    ("m", "%-M"),
    ("ss", "%S"),
    ("s", "%-S"),
    ("a", "%p"),
    ("ZZZ", "%z"),
    ("ZZ", "%:z"),
    ("Z", "%:::z"),
    ("z", "%Z"),
    ("TT", "%H:%M:%S"),
    ("T", "%H:%M"),
    ("tt", "%-I:%M:%S %p"),
    ("t", "%-I:%M %p"),
    ("DDDD", "%A, %B %-d, %Y"),
    ("DDD", "%B %-d, %Y"),
    ("DD", "%b %-d, %Y"),
    ("D", "%x"),
    ("FF", "%b %-d, %Y, %-I:%M:%S %p"),
    ("ff", "%b %-d, %Y, %-I:%M %p"),
    ("F", "%x, %-I:%M:%S %p"),
    ("f", "%x, %-I:%M %p"),
];

/// A named pattern offered in the settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatPreset {
    /// Stable identifier.
    pub id: &'static str,
    /// Label shown to the user.
    pub name: &'static str,
    /// The pattern itself.
    pub format: &'static str,
}

/// Patterns offered as presets, in display order.
pub const FORMAT_PRESETS: [FormatPreset; 13] = [
    FormatPreset { id: "time24", name: "Time 24h", format: "HH:mm" },
    FormatPreset { id: "time24sec", name: "Time 24h + Seconds", format: "HH:mm:ss" },
    FormatPreset { id: "time12", name: "Time 12h", format: "h:mm a" },
    FormatPreset { id: "time12sec", name: "Time 12h + Seconds", format: "h:mm:ss a" },
    FormatPreset { id: "dateShort", name: "Date Short", format: "MM/dd/yyyy" },
    FormatPreset { id: "dateLong", name: "Date Long", format: "MMMM d, yyyy" },
    FormatPreset { id: "dateISO", name: "Date ISO", format: "yyyy-MM-dd" },
    FormatPreset { id: "full", name: "Full DateTime", format: "EEEE, MMMM d, yyyy HH:mm" },
    FormatPreset { id: "weekdayTime", name: "Weekday + Time", format: "EEE HH:mm" },
    FormatPreset { id: "isoWeek", name: "ISO Week", format: "kkkk-'W'WW" },
    FormatPreset { id: "ordinal", name: "Ordinal Date", format: "yyyy-ooo" },
    FormatPreset { id: "quarter", name: "Quarter", format: "'Q'q yyyy" },
    FormatPreset { id: "withMillis", name: "Time with Milliseconds", format: "HH:mm:ss.SSS" },
];

/// Preset whose pattern is exactly `pattern`.
pub fn find_preset(pattern: &str) -> Option<&'static FormatPreset> {
    FORMAT_PRESETS.iter().find(|preset| preset.format == pattern)
}

/// Renders `datetime` according to `pattern`.
///
/// Escape sequences (`\n`, `\t`, `\\`) in the pattern are processed first.
pub fn format<Tz>(pattern: &str, datetime: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let pattern = process_escape_sequences(pattern);
    let mut output = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern.as_str();

    while let Some(c) = rest.chars().next() {
        if c == '\'' {
            if let Some(end) = rest[1..].find('\'') {
                output.push_str(&rest[1..=end]);
                rest = &rest[end + 2..];
                continue;
            }
        }

        if let Some((token, computed)) = COMPUTED_TOKENS
            .iter()
            .find(|(token, _)| rest.starts_with(token))
        {
            write_computed(&mut output, *computed, datetime);
            rest = &rest[token.len()..];
            continue;
        }

        if let Some((token, directive)) = STRFTIME_TOKENS
            .iter()
            .find(|(token, _)| rest.starts_with(token))
        {
            if write!(output, "{}", datetime.format(directive)).is_err() {
                output.push_str(token);
            }
            rest = &rest[token.len()..];
            continue;
        }

        output.push(c);
        rest = &rest[c.len_utf8()..];
    }

    output
}

fn write_computed<Tz: TimeZone>(output: &mut String, computed: Computed, datetime: &DateTime<Tz>) {
    let nanos = datetime.nanosecond() % 1_000_000_000;
    let millis = nanos / 1_000_000;
    let micros = nanos / 1_000;
    let after_christ = datetime.year() >= 1;

    // Writing to a String cannot fail.
    let _ = match computed {
        Computed::Millis3 => write!(output, "{millis:03}"),
        Computed::Millis2 => write!(output, "{millis:02}"),
        Computed::Millis1 => write!(output, "{millis}"),
        Computed::Fraction1 => write!(output, "{}", micros / 100_000),
        Computed::Fraction2 => write!(output, "{:02}", micros / 10_000),
        Computed::Quarter => write!(output, "{}", datetime.month0() / 3 + 1),
        Computed::EraLetter => output.write_str(if after_christ { "A" } else { "B" }),
        Computed::EraLong => {
            output.write_str(if after_christ { "Anno Domini" } else { "Before Christ" })
        }
        Computed::EraShort => output.write_str(if after_christ { "AD" } else { "BC" }),
    };
}

/// True if the pattern shows seconds or anything finer.
pub fn has_second_tokens(pattern: &str) -> bool {
    pattern.contains(['s', 'S', 'u'])
}
