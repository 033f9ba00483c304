//! Runtime `printf`-style formatting for format strings that are only known
//! at runtime.
//!
//! Specifiers follow `%[index$][flags][width][.precision]conversion`:
//!
//! | conversion | accepts            | output                                  |
//! |------------|--------------------|-----------------------------------------|
//! | `s` `S`    | any argument       | display form (`S` upper-cased)          |
//! | `d`        | integers           | decimal                                 |
//! | `x` `X` `o`| integers           | hex / octal, negatives as two's complement |
//! | `f` `e` `E`| floats             | fixed / scientific, default precision 6 |
//! | `c`        | chars              | the character                           |
//! | `b` `B`    | bools              | `true` / `false`                        |
//! | `%`        | nothing            | a literal `%`                           |
//! | `n`        | nothing            | a line break                            |
//!
//! Formatting is strict: every specifier needs a compatible argument and
//! every argument must be referenced. Any mismatch is an error and no partial
//! output is produced. Flags must suit their conversion: precision applies to
//! `s S f e E` only, `0` needs a width and a numeric conversion and cannot be
//! combined with `-`, and `+`/space need `d f e E`.

use std::fmt;

use thiserror::Error;

/// One runtime formatting argument.
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    Str(&'a str),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Bool(bool),
    /// Anything printable with `%s`.
    Display(&'a dyn fmt::Display),
}

impl Arg<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Arg::Str(_) => "string",
            Arg::Int(_) | Arg::UInt(_) => "integer",
            Arg::Float(_) => "float",
            Arg::Char(_) => "char",
            Arg::Bool(_) => "bool",
            Arg::Display(_) => "display",
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Arg::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Arg::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Arg::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Arg::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Arg::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Arg::Display(d) => f.debug_tuple("Display").field(&d.to_string()).finish(),
        }
    }
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Int(v) => write!(f, "{v}"),
            Arg::UInt(v) => write!(f, "{v}"),
            Arg::Float(v) => write!(f, "{v}"),
            Arg::Char(v) => write!(f, "{v}"),
            Arg::Bool(v) => write!(f, "{v}"),
            Arg::Display(d) => write!(f, "{d}"),
        }
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(v: &'a str) -> Self {
        Arg::Str(v)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(v: &'a String) -> Self {
        Arg::Str(v.as_str())
    }
}

macro_rules! arg_from {
    ($variant:ident as $target:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Arg<'_> {
                fn from(v: $t) -> Self {
                    Arg::$variant(v as $target)
                }
            }
        )+
    };
}

arg_from!(Int as i64: i8, i16, i32, i64, isize);
arg_from!(UInt as u64: u8, u16, u32, u64, usize);
arg_from!(Float as f64: f32, f64);

impl From<char> for Arg<'_> {
    fn from(v: char) -> Self {
        Arg::Char(v)
    }
}

impl From<bool> for Arg<'_> {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

/// Builds a `&[Arg]` slice from heterogeneous values.
///
/// ```
/// let line = logcat::printf::sprintf("%s=%d", logcat::args!["retries", 3]).unwrap();
/// assert_eq!(line, "retries=3");
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        &[$($crate::printf::Arg::from($value)),*]
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("specifier at byte {position} refers to argument {index}, but {supplied} were supplied")]
    MissingArgument {
        position: usize,
        index: usize,
        supplied: usize,
    },
    #[error("argument {index} of {supplied} is never referenced by the format string")]
    ExtraArguments { index: usize, supplied: usize },
    #[error("unknown conversion '{conversion}' at byte {position}")]
    UnknownConversion { conversion: char, position: usize },
    #[error("conversion '%{conversion}' at byte {position} cannot format a {found} argument")]
    IncompatibleArgument {
        conversion: char,
        position: usize,
        found: &'static str,
    },
    #[error("format string ends inside the specifier at byte {position}")]
    UnterminatedSpecifier { position: usize },
    #[error("malformed specifier '%{spec}' at byte {position}")]
    MalformedSpecifier { spec: String, position: usize },
}

#[derive(Debug, Default)]
struct Spec {
    index: Option<usize>,
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

/// Formats `fmt` with `args`.
///
/// # Errors
///
/// Returns a [`FormatError`] when a specifier is malformed or unknown, when
/// an argument does not fit its conversion, or when the argument count does
/// not match the specifiers.
pub fn sprintf(fmt: &str, args: &[Arg<'_>]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(fmt.len() + args.len() * 8);
    let mut used = vec![false; args.len()];
    let mut next = 0usize;
    let mut chars = fmt.char_indices();

    while let Some((position, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut raw = String::new();
        let conversion = loop {
            match chars.next() {
                Some((_, c)) if c.is_ascii_digit() || matches!(c, '$' | '-' | '+' | ' ' | '.') => {
                    raw.push(c);
                }
                Some((_, c)) => break c,
                None => return Err(FormatError::UnterminatedSpecifier { position }),
            }
        };
        let spec = parse_spec(&raw, conversion, position)?;

        match spec.conversion {
            '%' => pad(&mut out, &spec, "%".to_string(), false),
            'n' => out.push('\n'),
            's' | 'S' | 'd' | 'x' | 'X' | 'o' | 'f' | 'e' | 'E' | 'c' | 'b' | 'B' => {
                let index = match spec.index {
                    Some(i) => i - 1,
                    None => {
                        next += 1;
                        next - 1
                    }
                };
                let arg = args.get(index).ok_or(FormatError::MissingArgument {
                    position,
                    index: index + 1,
                    supplied: args.len(),
                })?;
                used[index] = true;
                let (body, numeric) = convert(&spec, arg, position)?;
                pad(&mut out, &spec, body, numeric);
            }
            other => {
                return Err(FormatError::UnknownConversion {
                    conversion: other,
                    position,
                });
            }
        }
    }

    if let Some(unused) = used.iter().position(|u| !u) {
        return Err(FormatError::ExtraArguments {
            index: unused + 1,
            supplied: args.len(),
        });
    }
    Ok(out)
}

fn parse_spec(raw: &str, conversion: char, position: usize) -> Result<Spec, FormatError> {
    let malformed = || FormatError::MalformedSpecifier {
        spec: format!("{raw}{conversion}"),
        position,
    };
    let mut spec = Spec {
        conversion,
        ..Spec::default()
    };

    let mut rest = raw;
    if let Some((idx, tail)) = raw.split_once('$') {
        let index: usize = idx.parse().map_err(|_| malformed())?;
        if index == 0 {
            return Err(malformed());
        }
        spec.index = Some(index);
        rest = tail;
    }

    let flags_end = rest
        .find(|c: char| !matches!(c, '-' | '+' | ' ' | '0'))
        .unwrap_or(rest.len());
    for flag in rest[..flags_end].chars() {
        match flag {
            '-' => spec.left = true,
            '+' => spec.plus = true,
            ' ' => spec.space = true,
            _ => spec.zero = true,
        }
    }
    rest = &rest[flags_end..];

    let (width, precision) = match rest.split_once('.') {
        Some((w, p)) => (w, Some(p)),
        None => (rest, None),
    };
    if !width.is_empty() {
        spec.width = Some(width.parse().map_err(|_| malformed())?);
    }
    if let Some(p) = precision {
        spec.precision = Some(if p.is_empty() {
            0
        } else {
            p.parse().map_err(|_| malformed())?
        });
    }
    if !matches!(
        conversion,
        's' | 'S' | 'd' | 'x' | 'X' | 'o' | 'f' | 'e' | 'E' | 'c' | 'b' | 'B' | '%' | 'n'
    ) {
        // Left for the caller to report as an unknown conversion.
        return Ok(spec);
    }
    let signed = matches!(conversion, 'd' | 'f' | 'e' | 'E');
    let numeric = signed || matches!(conversion, 'x' | 'X' | 'o');
    let takes_precision = matches!(conversion, 's' | 'S' | 'f' | 'e' | 'E');
    if ((spec.left || spec.zero) && spec.width.is_none())
        || (spec.left && spec.zero)
        || (spec.zero && !numeric)
        || ((spec.plus || spec.space) && !signed)
        || (spec.precision.is_some() && !takes_precision)
        || (conversion == 'n' && (spec.left || spec.width.is_some()))
    {
        return Err(malformed());
    }
    Ok(spec)
}

/// Renders one argument. The flag tells [`pad`] whether zero padding applies.
fn convert(spec: &Spec, arg: &Arg<'_>, position: usize) -> Result<(String, bool), FormatError> {
    let incompatible = || FormatError::IncompatibleArgument {
        conversion: spec.conversion,
        position,
        found: arg.kind(),
    };

    let body = match (spec.conversion, arg) {
        ('s' | 'S', _) => {
            let mut s = arg.to_string();
            if let Some(p) = spec.precision {
                if let Some((cut, _)) = s.char_indices().nth(p) {
                    s.truncate(cut);
                }
            }
            if spec.conversion == 'S' {
                s = s.to_uppercase();
            }
            return Ok((s, false));
        }
        ('d', Arg::Int(v)) => signed(spec, *v < 0, v.unsigned_abs().to_string()),
        ('d', Arg::UInt(v)) => signed(spec, false, v.to_string()),
        ('x', Arg::Int(v)) => format!("{:x}", *v as u64),
        ('x', Arg::UInt(v)) => format!("{v:x}"),
        ('X', Arg::Int(v)) => format!("{:X}", *v as u64),
        ('X', Arg::UInt(v)) => format!("{v:X}"),
        ('o', Arg::Int(v)) => format!("{:o}", *v as u64),
        ('o', Arg::UInt(v)) => format!("{v:o}"),
        ('f', Arg::Float(v)) => {
            let p = spec.precision.unwrap_or(6);
            signed(spec, v.is_sign_negative(), format!("{:.p$}", v.abs()))
        }
        ('e' | 'E', Arg::Float(v)) => {
            let p = spec.precision.unwrap_or(6);
            let mut s = scientific(v.abs(), p);
            if spec.conversion == 'E' {
                s = s.to_uppercase();
            }
            signed(spec, v.is_sign_negative(), s)
        }
        ('c', Arg::Char(c)) => return Ok((c.to_string(), false)),
        ('b', Arg::Bool(b)) => return Ok((b.to_string(), false)),
        ('B', Arg::Bool(b)) => return Ok((b.to_string().to_uppercase(), false)),
        _ => return Err(incompatible()),
    };
    Ok((body, true))
}

fn signed(spec: &Spec, negative: bool, digits: String) -> String {
    let sign = if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    };
    format!("{sign}{digits}")
}

/// `1.500000e+00` rather than Rust's `1.5e0`.
fn scientific(v: f64, precision: usize) -> String {
    let raw = format!("{v:.precision$e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        None => raw,
    }
}

fn pad(out: &mut String, spec: &Spec, body: String, numeric: bool) {
    let len = body.chars().count();
    let width = spec.width.unwrap_or(0);
    if len >= width {
        out.push_str(&body);
        return;
    }
    let fill = width - len;
    if spec.left {
        out.push_str(&body);
        out.extend(std::iter::repeat_n(' ', fill));
    } else if spec.zero && numeric {
        let sign_len = usize::from(body.starts_with(['-', '+', ' ']));
        out.push_str(&body[..sign_len]);
        out.extend(std::iter::repeat_n('0', fill));
        out.push_str(&body[sign_len..]);
    } else {
        out.extend(std::iter::repeat_n(' ', fill));
        out.push_str(&body);
    }
}
