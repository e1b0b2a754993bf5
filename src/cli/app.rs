//! Command handlers and text rendering for the garden CLI.
use std::{
    fs::{read_to_string, OpenOptions},
    io::{stdin, stdout, Write},
    path::Path,
    process::Command,
};

use chrono::Local;
use console::style;
use log::info;
use serde::Serialize;
use shell_words::split;
use tempfile::Builder;

use crate::{
    counts_for_grid, parse_date_arg, parse_month_arg, parse_note_type, CalendarCell, Commands,
    Config, DateKey, DayCounts, GardenError, Note, NoteType, Result, SaveStatus, Session,
    WEEKDAY_LABELS,
};

const CELL_WIDTH: usize = 10;
const FLOWER: &str = "✿";

/// CLI Application handler - processes CLI commands against one session
pub struct App {
    session: Session,

    /// Application configuration
    config: Config,

    /// Whether to display verbose output
    verbose: bool,
}

#[derive(Serialize)]
struct CellView<'a> {
    #[serde(flatten)]
    cell: &'a CalendarCell,
    counts: DayCounts,
}

#[derive(Serialize)]
struct MonthView<'a> {
    title: String,
    cells: Vec<CellView<'a>>,
}

impl App {
    pub fn new(session: Session, config: Config, verbose: bool) -> Self {
        Self {
            session,
            config,
            verbose,
        }
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Month {
                month,
                offset,
                json,
            } => self.show_month(month, offset, json)?,

            Commands::Day { date, json } => self.show_day(&date, json)?,

            Commands::Add {
                date,
                note_type,
                content,
                edit,
            } => self.add_note(&date, &note_type, content, edit)?,

            Commands::Delete { date, id, force } => self.delete_note(&date, &id, force)?,

            Commands::Config { show } => self.show_config(show)?,
        }

        Ok(())
    }

    fn show_month(&mut self, month: Option<String>, offset: i32, json: bool) -> Result<()> {
        if let Some(month) = month {
            self.session.show_month(parse_month_arg(&month)?)?;
        }
        if offset != 0 {
            self.session.show_offset(offset)?;
        }

        if json {
            println!("{}", self.month_json()?);
            return Ok(());
        }

        for line in self.month_lines() {
            println!("{}", line);
        }

        if self.verbose {
            println!(
                "\n{} notes stored across all days",
                self.session.records().note_count()
            );
        }
        Ok(())
    }

    /// The displayed month as JSON: title plus one entry per grid cell
    fn month_json(&self) -> Result<String> {
        let grid = self.session.grid();
        let counts = counts_for_grid(self.session.records(), &grid);
        let view = MonthView {
            title: self.session.month_title(),
            cells: grid
                .iter()
                .zip(counts)
                .map(|(cell, counts)| CellView { cell, counts })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&view)?)
    }

    /// Title, weekday header and six week rows of the displayed month
    fn month_lines(&self) -> Vec<String> {
        let grid = self.session.grid();
        let counts = counts_for_grid(self.session.records(), &grid);

        let header: String = WEEKDAY_LABELS
            .iter()
            .map(|label| format!("{:<width$}", label, width = CELL_WIDTH))
            .collect();

        let mut lines = vec![
            style(self.session.month_title()).bold().yellow().to_string(),
            style(header.trim_end()).bold().to_string(),
        ];
        lines.extend(grid.chunks(7).zip(counts.chunks(7)).map(|(week_cells, week_counts)| {
            week_cells
                .iter()
                .zip(week_counts)
                .map(|(cell, counts)| render_cell(cell, counts))
                .collect::<String>()
        }));
        lines
    }

    fn show_day(&self, date: &str, json: bool) -> Result<()> {
        let key = parse_date_arg(date)?;
        let notes = self.session.records_for(&key);

        if json {
            println!("{}", serde_json::to_string_pretty(notes)?);
            return Ok(());
        }

        let title = key
            .to_date()
            .map(|d| d.format("%A, %B %-d").to_string())
            .unwrap_or_else(|_| key.to_string());
        println!("{}", style(title).bold());

        if notes.is_empty() {
            println!("Nothing planted yet.");
            return Ok(());
        }

        for note in notes {
            println!("{}", render_note(note));
        }

        let counts = self.session.counts_for(&key);
        println!(
            "\n{} {}  {} {}",
            style(FLOWER).red(),
            counts.positive,
            style(FLOWER).blue(),
            counts.needs_work
        );
        Ok(())
    }

    fn add_note(&mut self, date: &str, note_type: &str, content: Option<String>, edit: bool) -> Result<()> {
        if content.is_some() && edit {
            return Err(GardenError::EditorError {
                message: "Cannot specify both --content and --edit options".to_string(),
            });
        }

        let key = parse_date_arg(date)?;
        let note_type = parse_note_type(note_type)?;

        let content = match content {
            Some(c) => c,
            None if edit => self.open_editor_for_content(&key, note_type)?,
            None => String::new(),
        };

        let planted = self
            .session
            .add_note(&key, note_type, &content)
            .ok_or(GardenError::EmptyContent)?;

        println!(
            "Planted a {} flower on {} (ID: {})",
            style_type(note_type),
            key,
            planted.note.id()
        );
        report_save(&planted.save);
        Ok(())
    }

    fn delete_note(&mut self, date: &str, id: &str, force: bool) -> Result<()> {
        let key = parse_date_arg(date)?;
        let Some(note) = self.session.records().find(&key, id).cloned() else {
            println!("No note {} on {}, nothing deleted.", id, key);
            return Ok(());
        };

        if !force {
            println!("You are about to delete the following note:");
            println!("{}", render_note(&note));

            print!("\nAre you sure you want to delete this note? [y/N]: ");
            stdout().flush()?;

            let mut input = String::new();
            stdin().read_line(&mut input)?;

            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        if let Some(save) = self.session.delete_note(&key, id) {
            println!("Note {} removed from {}.", note.id(), key);
            report_save(&save);
        }
        Ok(())
    }

    fn show_config(&self, show: bool) -> Result<()> {
        if show || self.verbose {
            println!("{}", serde_json::to_string_pretty(&self.config)?);
        } else {
            println!("Use --show to print the effective configuration.");
        }
        Ok(())
    }

    fn open_editor_for_content(&self, key: &DateKey, note_type: NoteType) -> Result<String> {
        let temp_file = Builder::new().suffix(".txt").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        let editor_cmd = self.config.get_editor_command();
        self.write_editor_template(&temp_path, key, note_type)?;

        info!("Opening editor to write note content. Save and exit when done...");
        self.launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path)?;
        Ok(strip_editor_comments(&content))
    }

    fn write_editor_template(&self, path: &Path, key: &DateKey, note_type: NoteType) -> Result<()> {
        let mut file = OpenOptions::new().write(true).open(path)?;

        writeln!(file)?;
        writeln!(file, "# New {} note for {}", note_type, key)?;
        writeln!(file, "# Lines starting with '#' are ignored.")?;
        writeln!(file, "# Leave the note empty to cancel.")?;

        Ok(())
    }

    fn launch_editor(&self, editor_cmd: &str, file_path: &Path) -> Result<()> {
        let args = split(editor_cmd).map_err(|e| GardenError::EditorError {
            message: format!("Failed to parse editor command: {}", e),
        })?;

        let Some((program, rest)) = args.split_first() else {
            return Err(GardenError::EditorError {
                message: "Empty editor command".to_string(),
            });
        };

        let status = Command::new(program).args(rest).arg(file_path).status()?;

        if !status.success() {
            return Err(GardenError::EditorError {
                message: "Editor exited with non-zero status".to_string(),
            });
        }

        Ok(())
    }
}

/// Drops `#` comment lines and surrounding blank space from editor output
fn strip_editor_comments(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<&str>>()
        .join("\n")
        .trim()
        .to_string()
}

fn report_save(save: &SaveStatus) {
    if let Some(warning) = save_warning(save) {
        eprintln!("{}", warning);
    }
}

fn save_warning(save: &SaveStatus) -> Option<String> {
    match save {
        SaveStatus::Saved => None,
        SaveStatus::Unsaved { reason } => Some(format!(
            "{} changes may not be saved ({})",
            style("warning:").yellow().bold(),
            reason
        )),
    }
}

fn style_type(note_type: NoteType) -> String {
    match note_type {
        NoteType::Positive => style(note_type.tag()).red().to_string(),
        NoteType::NeedsWork => style(note_type.tag()).blue().to_string(),
    }
}

fn render_note(note: &Note) -> String {
    let time = note.created_at().with_timezone(&Local).format("%H:%M");
    let flower = match note.note_type() {
        NoteType::Positive => style(FLOWER).red(),
        NoteType::NeedsWork => style(FLOWER).blue(),
    };
    format!("{} {}  {}  {}", flower, time, note.content(), style(note.id()).dim())
}

/// Renders one fixed-width grid cell: day number then red/blue counts
fn render_cell(cell: &CalendarCell, counts: &DayCounts) -> String {
    let day = format!("{:>2}", chrono::Datelike::day(&cell.date));
    let mut plain_len = day.len();

    let day = if cell.is_today {
        style(day).bold().reverse().to_string()
    } else if cell.is_current_month {
        day
    } else {
        style(day).dim().to_string()
    };

    let mut out = day;
    for (count, positive) in [(counts.positive, true), (counts.needs_work, false)] {
        if count == 0 {
            continue;
        }
        let text = format!("{}{}", FLOWER, count);
        plain_len += 1 + text.chars().count();
        out.push(' ');
        out.push_str(&if positive {
            style(text).red().to_string()
        } else {
            style(text).blue().to_string()
        });
    }

    out.push_str(&" ".repeat(CELL_WIDTH.saturating_sub(plain_len)));
    out
}
