use ariadne::{Config, Label, Report, ReportKind, Source};
use owo_colors::{OwoColorize, Style};
use std::{
    fmt,
    io::{self, Write},
    ops::Range,
};

use crate::text::{center, trim_end};

/// A run of carets under the header, optionally labelled underneath.
///
/// Spans are char offsets into the header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mark {
    pub span: Range<usize>,
    pub label: Option<String>,
}

impl Mark {
    pub fn new(span: Range<usize>) -> Self {
        Self { span, label: None }
    }

    pub fn labelled(span: Range<usize>, label: impl Into<String>) -> Self {
        Self {
            span,
            label: Some(label.into()),
        }
    }
}

/// A numbered block of evidence lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Callout {
    pub number: usize,
    pub lines: Vec<String>,
}

impl Callout {
    pub fn new(number: usize, lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            number,
            lines: lines.into_iter().collect(),
        }
    }

    fn prefix(&self) -> String {
        format!("{})", self.number)
    }
}

impl fmt::Display for Callout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.prefix(), self.lines.join("\n    "))
    }
}

/// A failure report laid out around an annotated signature header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub title: String,
    pub header: String,
    pub marks: Vec<Mark>,
    pub callouts: Vec<Callout>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(title: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            header: header.into(),
            marks: Vec::new(),
            callouts: Vec::new(),
            message: String::new(),
        }
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self.marks.sort_by_key(|m| m.span.start);
        self
    }

    pub fn with_callout(mut self, callout: Callout) -> Self {
        self.callouts.push(callout);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// The caret line. Overlapping runs are clipped.
    pub fn carets(&self) -> String {
        let mut line = String::new();
        let mut cursor = 0;
        for Mark { span, .. } in &self.marks {
            let start = span.start.max(cursor);
            if span.end <= start {
                continue;
            }
            line.extend(std::iter::repeat(' ').take(start - cursor));
            line.extend(std::iter::repeat('^').take(span.end - start));
            cursor = span.end;
        }
        line
    }

    /// The label line, each label centred under its caret run.
    pub fn labels(&self) -> String {
        let mut line = String::new();
        let mut cursor = 0;
        for Mark { span, label } in &self.marks {
            let Some(label) = label else {
                continue;
            };
            if span.start > cursor {
                line.extend(std::iter::repeat(' ').take(span.start - cursor));
                cursor = span.start;
            } else if cursor > 0 {
                line.push(' ');
                cursor += 1;
            }
            let run = " ".repeat(span.end.saturating_sub(span.start));
            let centred = center(label, &run);
            cursor += centred.chars().count();
            line.push_str(&centred);
        }
        trim_end(&line).to_owned()
    }

    /// Writes the diagnostic with terminal colours.
    pub fn write_styled(&self, mut w: impl Write) -> io::Result<()> {
        let number = Style::new().cyan().bold();

        writeln!(w, "{}", self.title.style(Style::new().red().bold()))?;
        writeln!(w)?;
        writeln!(w, "{}", self.header)?;
        writeln!(w, "{}", self.carets().red())?;
        writeln!(w, "{}", self.labels().style(number))?;
        for callout in &self.callouts {
            writeln!(w)?;
            writeln!(
                w,
                "{}  {}",
                callout.prefix().style(number),
                callout.lines.join("\n    ")
            )?;
        }
        writeln!(w)?;
        writeln!(w, "{}", self.message)
    }

    /// Writes the diagnostic as a source report over the header.
    pub fn write_report(&self, w: impl Write) -> io::Result<()> {
        let offset = self.marks.first().map_or(0..0, |m| m.span.clone());
        let mut builder = Report::build(ReportKind::Error, offset)
            .with_config(Config::default().with_color(false))
            .with_message(&self.title);

        for mark in &self.marks {
            let mut label = Label::new(mark.span.clone());
            let callout = mark
                .label
                .as_ref()
                .and_then(|l| self.callouts.iter().find(|c| c.number.to_string() == *l));
            if let Some(callout) = callout {
                label = label.with_message(callout.lines.join("; "));
            }
            builder.add_label(label);
        }
        builder.set_note(&self.message);

        builder
            .finish()
            .write(Source::from(self.header.as_str()), w)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        writeln!(f, "{}", self.header)?;
        writeln!(f, "{}", trim_end(&self.carets()))?;
        writeln!(f, "{}", self.labels())?;
        for callout in &self.callouts {
            writeln!(f)?;
            writeln!(f, "{callout}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
