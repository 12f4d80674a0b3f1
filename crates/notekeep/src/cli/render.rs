use chrono::{DateTime, Utc};
use colored::Colorize;
use notekeepapp::content;
use notekeepapp::model::{Color, Note};
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const LINE_WIDTH: usize = 78;
const PIN_MARKER: &str = "⚲";

/// The active board: pinned notes as a leading block, then the rest.
pub fn print_board(notes: &[Note]) {
    if notes.is_empty() {
        println!("No notes yet.");
        return;
    }

    let mut last_was_pinned = false;
    for (i, note) in notes.iter().enumerate() {
        if i > 0 && last_was_pinned && !note.is_pinned {
            println!();
        }
        last_was_pinned = note.is_pinned;
        print_row(note);
    }
}

/// A flat chronological list (archive and trash views).
pub fn print_flat(notes: &[Note], empty_message: &str) {
    if notes.is_empty() {
        println!("{}", empty_message);
        return;
    }
    for note in notes {
        print_row(note);
    }
}

pub fn print_note(note: &Note) {
    println!(
        "{} {}",
        short_id(note).yellow(),
        display_title(note).bold()
    );
    println!("--------------------------------");
    for line in note.content.lines() {
        match content::image_url(line) {
            Some(url) => println!("{} {}", "[image]".cyan(), url.underline()),
            None => println!("{}", line),
        }
    }
    let mut tags: Vec<String> = Vec::new();
    if note.color != Color::White {
        tags.push(note.color.to_string());
    }
    if note.is_pinned {
        tags.push("pinned".to_string());
    }
    if note.is_archived {
        tags.push("archived".to_string());
    }
    if note.is_deleted {
        tags.push("trashed".to_string());
    }
    if !tags.is_empty() {
        println!();
        println!("{}", tags.join(" · ").dimmed());
    }
}

pub fn success(message: &str) {
    println!("{}", message.green());
}

fn print_row(note: &Note) {
    let marker = if note.is_pinned {
        format!("{} ", PIN_MARKER)
    } else {
        "  ".to_string()
    };
    let id = short_id(note);
    let title = display_title(note);
    let token = if note.color == Color::White {
        String::new()
    } else {
        format!(" [{}]", note.color)
    };

    let left = format!("{} {}{}{}", id, marker, title, token);
    let time = time_ago(note.created_at);
    let pad = LINE_WIDTH
        .saturating_sub(left.width())
        .saturating_sub(time.width())
        .max(2);

    println!(
        "{} {}{}{}{}{}",
        id.yellow(),
        marker,
        title.bold(),
        token.dimmed(),
        " ".repeat(pad),
        time.dimmed()
    );
}

fn display_title(note: &Note) -> &str {
    if note.title.is_empty() {
        "(untitled)"
    } else {
        &note.title
    }
}

fn short_id(note: &Note) -> String {
    note.id.to_string().chars().take(8).collect()
}

fn time_ago(at: DateTime<Utc>) -> String {
    let elapsed = (Utc::now() - at).to_std().unwrap_or_default();
    Formatter::new().convert(elapsed)
}
