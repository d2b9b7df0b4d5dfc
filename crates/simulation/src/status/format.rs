//! Positional `{n}` templates and number formatting for the status rows.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// `{` without a closing `}`.
    Unclosed { at: usize },
    /// `{...}` whose content is not an argument index.
    BadPlaceholder { at: usize },
    /// `}` outside a placeholder and not doubled.
    StrayBrace { at: usize },
    MissingArgument { index: usize, provided: usize },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Unclosed { at } => write!(f, "unclosed placeholder at byte {at}"),
            TemplateError::BadPlaceholder { at } => write!(f, "invalid placeholder at byte {at}"),
            TemplateError::StrayBrace { at } => write!(f, "unmatched '}}' at byte {at}"),
            TemplateError::MissingArgument { index, provided } => {
                write!(f, "placeholder {{{index}}} but only {provided} arguments")
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Substitute `{0}`, `{1}`, ... with `args`. `{{` and `}}` are literal braces.
pub fn format_template(template: &str, args: &[String]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.char_indices().peekable();
    while let Some((at, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, c)| c == '{').is_some() {
                    out.push('{');
                    continue;
                }
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, d)) if d.is_ascii_digit() => digits.push(d),
                        Some(_) => return Err(TemplateError::BadPlaceholder { at }),
                        None => return Err(TemplateError::Unclosed { at }),
                    }
                }
                let index: usize = digits
                    .parse()
                    .map_err(|_| TemplateError::BadPlaceholder { at })?;
                let arg = args.get(index).ok_or(TemplateError::MissingArgument {
                    index,
                    provided: args.len(),
                })?;
                out.push_str(arg);
            }
            '}' => {
                if chars.next_if(|&(_, c)| c == '}').is_none() {
                    return Err(TemplateError::StrayBrace { at });
                }
                out.push('}');
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}

/// Integer with `,` thousands separators.
pub fn format_n0(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Wall-clock time of day (UTC) as `HH:MM:SS`.
pub fn clock_hms(secs_since_epoch: u64) -> String {
    let day = secs_since_epoch % 86_400;
    format!("{:02}:{:02}:{:02}", day / 3600, (day % 3600) / 60, day % 60)
}
