use truely_core::ProcessRecord;
use truely_core::window::WindowRecord;

/// Box-drawn table with one width per column.
struct TableFormatter {
    widths: Vec<usize>,
}

impl TableFormatter {
    fn new(widths: Vec<usize>) -> Self {
        Self { widths }
    }

    fn print_table(&self, headers: &[&str], rows: &[Vec<String>]) {
        println!("{}", self.border('┌', '┬', '┐'));
        println!("{}", self.row(headers.iter().map(|h| h.to_string())));
        println!("{}", self.border('├', '┼', '┤'));
        for row in rows {
            println!("{}", self.row(row.iter().cloned()));
        }
        println!("{}", self.border('└', '┴', '┘'));
    }

    fn border(&self, left: char, middle: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", segments.join(&middle.to_string()))
    }

    fn row(&self, cells: impl Iterator<Item = String>) -> String {
        let cells: Vec<String> = cells
            .zip(&self.widths)
            .map(|(cell, &width)| format!(" {} ", truncate(&cell, width)))
            .collect();
        format!("│{}│", cells.join("│"))
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str, max: usize) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.chars().count())
        .min(max)
}

pub fn print_processes_table(records: &[ProcessRecord]) {
    let name_width = column_width(records.iter().map(|r| r.name()), "Name", 30);
    let path_width = column_width(records.iter().map(|r| r.path()), "Path", 60);
    let formatter = TableFormatter::new(vec![7, name_width, 7, 7, 8, 4, path_width]);

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.pid().to_string(),
                r.name().to_string(),
                r.window_count().to_string(),
                r.screen_evasion_count().to_string(),
                r.elevated_layer_count().to_string(),
                if r.is_suspicious() { "!" } else { "" }.to_string(),
                r.path().to_string(),
            ]
        })
        .collect();

    formatter.print_table(
        &["PID", "Name", "Windows", "Evasion", "Elevated", "Flag", "Path"],
        &rows,
    );
}

pub fn print_windows_table(windows: &[WindowRecord]) {
    let formatter = TableFormatter::new(vec![10, 10, 10, 10, 6, 10]);

    let rows: Vec<Vec<String>> = windows
        .iter()
        .map(|w| {
            let mut row = match w.bounds {
                Some(b) => vec![
                    format!("{:.0}", b.x),
                    format!("{:.0}", b.y),
                    format!("{:.0}", b.width),
                    format!("{:.0}", b.height),
                ],
                None => vec!["-".to_string(); 4],
            };
            row.push(w.layer.to_string());
            row.push(if w.is_capturable() { "yes" } else { "no" }.to_string());
            row
        })
        .collect();

    formatter.print_table(&["X", "Y", "Width", "Height", "Layer", "Capturable"], &rows);
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) so multi-byte names stay intact.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
