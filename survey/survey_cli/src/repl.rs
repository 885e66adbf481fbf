//! Interactive survey form.

use survey_cohort::SurveyContext;
use survey_data::{Attribute, RespondentDraft};

use crate::render::{render_draft, render_evaluation, render_options};

const HELP: &[&str] = &[
    "commands:",
    "  :set <field> <value>   answer a field (value label or its number from :options)",
    "  :unset <field>         clear one answer",
    "  :show                  current answers",
    "  :options [field]       allowed values",
    "  :clear                 start over",
    "  :help, :quit",
    "fields: age, edu_level, fav_animals, fav_place, gender",
];

/// Form state of one interactive session.
#[derive(Debug)]
pub struct FormSession<'a> {
    ctx: &'a SurveyContext,
    draft: RespondentDraft,
}

impl<'a> FormSession<'a> {
    pub fn new(ctx: &'a SurveyContext) -> Self {
        Self {
            ctx,
            draft: RespondentDraft::new(),
        }
    }

    pub fn draft(&self) -> &RespondentDraft {
        &self.draft
    }

    pub fn prompt(&self) -> &'static str {
        if self.draft.is_complete() {
            "survey> "
        } else {
            "survey?> "
        }
    }

    /// Handles one input line; returns the output lines and whether to exit.
    pub fn handle_line(&mut self, line: &str) -> (Vec<String>, bool) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return (Vec::new(), false);
        }
        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (trimmed, ""),
        };
        match command {
            ":help" | ":h" => (HELP.iter().map(|l| l.to_string()).collect(), false),
            ":q" | ":quit" | ":exit" => (Vec::new(), true),
            ":show" => (render_draft(&self.draft), false),
            ":options" => (self.options(rest), false),
            ":clear" => {
                self.draft.clear();
                (self.evaluate(), false)
            }
            ":unset" => match parse_field(rest) {
                Ok(attr) => {
                    self.draft.unset(attr);
                    (self.evaluate(), false)
                }
                Err(e) => (vec![e], false),
            },
            ":set" => match self.set(rest) {
                Ok(()) => (self.evaluate(), false),
                Err(e) => (vec![e], false),
            },
            other => (
                vec![format!("error: unknown command '{other}' (type :help)")],
                false,
            ),
        }
    }

    fn set(&mut self, args: &str) -> Result<(), String> {
        let Some((field, value)) = args.split_once(char::is_whitespace) else {
            return Err("error: usage: :set <field> <value>".to_string());
        };
        let attr = parse_field(field)?;
        let label = resolve_value(attr, value.trim());
        self.draft
            .set(attr, &label)
            .map_err(|e| format!("error: {e}"))
    }

    fn options(&self, field: &str) -> Vec<String> {
        if field.is_empty() {
            return Attribute::ALL.into_iter().flat_map(render_options).collect();
        }
        match parse_field(field) {
            Ok(attr) => render_options(attr),
            Err(e) => vec![e],
        }
    }

    fn evaluate(&self) -> Vec<String> {
        match self.ctx.evaluate(&self.draft) {
            Ok(evaluation) => render_evaluation(&evaluation),
            Err(e) => vec![format!("error: {e}")],
        }
    }
}

fn parse_field(field: &str) -> Result<Attribute, String> {
    if field.is_empty() {
        return Err("error: missing field name".to_string());
    }
    field.parse::<Attribute>().map_err(|e| format!("error: {e}"))
}

/// A 1-based number selects the value at that position in `:options`.
fn resolve_value(attribute: Attribute, value: &str) -> String {
    let labels = attribute.labels();
    match value.parse::<usize>() {
        Ok(n) if (1..=labels.len()).contains(&n) => labels[n - 1].to_string(),
        _ => value.to_string(),
    }
}

pub fn run_repl(ctx: &SurveyContext) -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize repl: {e}");
            return 2;
        }
    };

    println!("Powiedz nam coś o sobie");
    println!("Pomożemy Ci znaleźć osoby podobne do Ciebie (:help lists commands)");
    let mut session = FormSession::new(ctx);
    loop {
        match rl.readline(session.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let (out, exit) = session.handle_line(&line);
                for l in out {
                    println!("{l}");
                }
                if exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: repl failed: {e}");
                return 2;
            }
        }
    }
}
