use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use chrono::{DateTime, Local};
use taxon_model::{CategoryKind, Notice, RowView, Severity};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self { color })
    }

    pub fn print_date_header(&mut self, now: DateTime<Local>) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let header = format_dashboard_date(now);
        writeln!(out, "{}", self.paint(&header, "1"))?;
        writeln!(out)?;
        Ok(())
    }

    #[tracing::instrument(skip(self, rows))]
    pub fn print_category_table(&mut self, kind: CategoryKind, rows: &[RowView]) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        writeln!(out, "{}", self.paint(&format!("{} categories", kind.label()), "36"))?;
        if rows.is_empty() {
            writeln!(out, "(none)")?;
            writeln!(out)?;
            return Ok(());
        }

        let headers = vec!["#".to_string(), "Name".to_string(), "ID".to_string()];
        let rows = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                vec![
                    self.paint(&(idx + 1).to_string(), "33"),
                    row.display_name().to_string(),
                    row.id.clone(),
                ]
            })
            .collect();

        write_table(&mut out, headers, rows)?;
        writeln!(out)?;
        Ok(())
    }

    pub fn print_notice(&mut self, notice: &Notice) -> anyhow::Result<()> {
        let code = match notice.severity {
            Severity::Success => "32",
            Severity::Warning => "33",
            Severity::Error => "31",
        };
        let text = self.paint(&notice.message, code);
        match notice.severity {
            Severity::Success => writeln!(io::stdout().lock(), "{text}")?,
            Severity::Warning | Severity::Error => writeln!(io::stderr().lock(), "{text}")?,
        }
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

/// `Monday, October 19, 2026`
pub fn format_dashboard_date(now: DateTime<Local>) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dashboard_date_uses_long_us_format() {
        let when = Local
            .with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
            .single()
            .expect("unambiguous local time");
        assert_eq!(format_dashboard_date(when), "Monday, October 19, 2026");
    }

    #[test]
    fn table_pads_by_visible_width() {
        let mut buf = Vec::new();
        write_table(
            &mut buf,
            vec!["#".to_string(), "Name".to_string()],
            vec![
                vec!["\x1b[33m1\x1b[0m".to_string(), "Élevé".to_string()],
                vec!["2".to_string(), "Low".to_string()],
            ],
        )
        .expect("write table");

        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# Name  ");
        assert_eq!(lines[1], "- ----- ");
        assert_eq!(strip_ansi(lines[2]), "1 Élevé ");
        assert_eq!(lines[3], "2 Low   ");
    }
}
