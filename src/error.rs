use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The span as character indices into `source`, which is how ariadne
    /// counts positions. Spans themselves hold byte offsets.
    pub fn char_range(&self, source: &str) -> Range<usize> {
        let to_chars = |offset: usize| {
            source
                .get(..offset)
                .map_or(offset, |prefix| prefix.chars().count())
        };
        to_chars(self.start)..to_chars(self.end)
    }

    /// Zero-width span, used for the end-of-input token.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IllegalCharacter,
    UnterminatedString,
}

/// A lexical diagnostic. The tokenizer keeps going after recording one.
#[derive(Debug, Clone)]
pub struct GoldError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl GoldError {
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn new_with_help(kind: ErrorKind, span: Span, message: String, help: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: Some(help),
        }
    }

    pub fn illegal_character(span: Span, c: char) -> Self {
        Self::new(
            ErrorKind::IllegalCharacter,
            span,
            format!("Unexpected character: '{}'", c),
        )
    }

    pub fn unterminated_string(span: Span) -> Self {
        Self::new_with_help(
            ErrorKind::UnterminatedString,
            span,
            "Unterminated string".to_string(),
            "String literals must be closed with '\"' before the end of input.".to_string(),
        )
    }

    pub fn report(&self, source: &str, filename: Option<&str>) {
        eprint!("{}", self.render(source, filename, true));
    }

    /// Renders the diagnostic as ariadne would print it.
    pub fn render(&self, source: &str, filename: Option<&str>, color: bool) -> String {
        let filename = filename.unwrap_or("<repl>");
        let range = self.span.char_range(source);

        let label_color = match self.kind {
            ErrorKind::IllegalCharacter => Color::Red,
            ErrorKind::UnterminatedString => Color::Yellow,
        };

        let mut report_builder = Report::build(ReportKind::Error, filename, range.start)
            .with_config(Config::default().with_color(color))
            .with_message(format!("{}: {}", "Lexical Error".fg(label_color), self.message))
            .with_label(
                Label::new((filename, range))
                    .with_message(&self.message)
                    .with_color(label_color),
            );

        if let Some(ref help_text) = self.help {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail on the I/O side.
        let _ = report_builder
            .finish()
            .write((filename, Source::from(source)), &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl fmt::Display for GoldError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GoldError {}
