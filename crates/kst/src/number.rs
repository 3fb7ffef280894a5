//! Numeric literal parsing.
//!
//! Tokens are tried against a fixed list of grammars; the first grammar whose
//! pattern matches the whole token decides the result:
//!
//! 1. plain decimal fast path
//! 2. common positional number, `sign? digits ([.,] digits)? (e exp)? (b base)?`
//! 3. hexadecimal, `sign? 0x hex ([.,] hex)? ([p^] exp)?`
//! 4. extended base, `sign? word ([.,] word)? (^ exp)? (@ base)?`
//! 5. arc length with a leading sign, `sign? (D d|°)? (M '|′)? (S[.,s] "|″)?`
//! 6. arc length with a trailing direction letter (`n`, `s`, `e`, `w`)
//!
//! Markers are matched against lower case only; callers lower-case tokens
//! before handing them over.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static COMMON_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([+-])?([0-9]+)(?:[.,]([0-9]*))?(?:e([+-]?[0-9]+))?(?:b([0-9]+))?$")
});

static HEX_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([+-])?0x([0-9a-f]+)(?:[.,]([0-9a-f]*))?(?:[p^]([+-]?[0-9a-f]+))?$")
});

static EXT_BASE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([+-])?(\w+)(?:[.,](\w*))?(?:\^([+-]?\w+))?(?:@([0-9]+))?$")
});

static ARC_NUMBER_SIGNED: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"^([+-])?(?:([0-9]+)[d°])?(?:([0-9]+)['′])?(?:([0-9]+)(?:[.,]([0-9]*))?["″])?$"#)
});

static ARC_NUMBER_DIRECTED: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"^(?:([0-9]+)[d°])?(?:([0-9]+)['′])?(?:([0-9]+)(?:[.,]([0-9]*))?["″])?([nsew])$"#)
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("numeric grammar pattern is a valid regex")
}

/// Positional pieces of a matched number, prior to interpretation.
#[derive(Debug, Clone, Copy)]
struct Positional<'a> {
    sign: &'a str,
    int: &'a str,
    frac: &'a str,
    exp: &'a str,
    base: u32,
}

/// Degree/minute/second pieces of a matched arc length.
#[derive(Debug, Clone, Copy)]
struct Arc<'a> {
    sign: &'a str,
    deg: &'a str,
    min: &'a str,
    sec: &'a str,
    frac: &'a str,
}

impl Arc<'_> {
    fn is_empty(&self) -> bool {
        self.deg.is_empty() && self.min.is_empty() && self.sec.is_empty() && self.frac.is_empty()
    }

    fn is_negative(&self) -> bool {
        matches!(self.sign, "-" | "s" | "w")
    }
}

enum Matched<'a> {
    Positional(Positional<'a>),
    Arc(Arc<'a>),
}

#[inline]
fn group<'a>(caps: &Captures<'a>, i: usize) -> &'a str {
    caps.get(i).map_or("", |m| m.as_str())
}

fn read_base(text: &str, default: u32, max: u32) -> Option<u32> {
    if text.is_empty() {
        return Some(default);
    }
    let base: u32 = text.parse().ok()?;
    (2..=max).contains(&base).then_some(base)
}

/// Match `text` against the general grammars in order. `None` for the outer
/// option means nothing matched; `Some(None)` means a grammar matched but its
/// base was out of range.
fn classify(text: &str) -> Option<Option<Matched<'_>>> {
    if let Some(c) = COMMON_NUMBER.captures(text) {
        return Some(read_base(group(&c, 5), 10, 10).map(|base| {
            Matched::Positional(Positional {
                sign: group(&c, 1),
                int: group(&c, 2),
                frac: group(&c, 3),
                exp: group(&c, 4),
                base,
            })
        }));
    }
    if let Some(c) = HEX_NUMBER.captures(text) {
        return Some(Some(Matched::Positional(Positional {
            sign: group(&c, 1),
            int: group(&c, 2),
            frac: group(&c, 3),
            exp: group(&c, 4),
            base: 16,
        })));
    }
    if let Some(c) = EXT_BASE_NUMBER.captures(text) {
        return Some(read_base(group(&c, 5), 10, 36).map(|base| {
            Matched::Positional(Positional {
                sign: group(&c, 1),
                int: group(&c, 2),
                frac: group(&c, 3),
                exp: group(&c, 4),
                base,
            })
        }));
    }
    if let Some(c) = ARC_NUMBER_SIGNED.captures(text) {
        return Some(Some(Matched::Arc(Arc {
            sign: group(&c, 1),
            deg: group(&c, 2),
            min: group(&c, 3),
            sec: group(&c, 4),
            frac: group(&c, 5),
        })));
    }
    if let Some(c) = ARC_NUMBER_DIRECTED.captures(text) {
        return Some(Some(Matched::Arc(Arc {
            sign: group(&c, 5),
            deg: group(&c, 1),
            min: group(&c, 2),
            sec: group(&c, 3),
            frac: group(&c, 4),
        })));
    }
    None
}

#[inline]
fn digits_valid(s: &str, base: u32) -> bool {
    s.chars().all(|c| c.to_digit(base).is_some())
}

/// Parse `text` as a 64-bit signed integer.
///
/// Fractional digits left over after applying the exponent are validated and
/// then truncated. Values outside the `i64` range are rejected.
pub fn parse_long(text: &str) -> Option<i64> {
    if let Some(v) = parse_basic_long(text) {
        return Some(v);
    }
    match classify(text)?? {
        Matched::Positional(p) => long_from_positional(p),
        Matched::Arc(a) => long_from_arc(a),
    }
}

/// Parse `text` as a double.
///
/// Unlike [`parse_long`], a well-formed number whose magnitude leaves the
/// `f64` range is not an error: it yields a signed infinity (overflow) or a
/// signed zero (underflow).
pub fn parse_real(text: &str) -> Option<f64> {
    if let Some(v) = parse_basic_real(text) {
        return Some(v);
    }
    match classify(text)?? {
        Matched::Positional(p) => real_from_positional(p),
        Matched::Arc(a) => real_from_arc(a),
    }
}

fn parse_basic_long(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    text.parse::<i64>().ok()
}

fn long_from_positional(p: Positional<'_>) -> Option<i64> {
    // Anything outside ASCII can never be a digit; rejecting it up front keeps
    // the byte slicing below on character boundaries.
    if !p.int.is_ascii() || !p.frac.is_ascii() {
        return None;
    }

    let exponent = if p.exp.is_empty() {
        0
    } else {
        i64::from_str_radix(p.exp, p.base).ok()?
    };

    let mut int = String::from(p.int);
    let mut frac = p.frac;
    let mut carried = String::new();

    if exponent > 0 {
        let shift = usize::try_from(exponent).unwrap_or(usize::MAX);
        if shift <= frac.len() {
            int.push_str(&frac[..shift]);
            frac = &frac[shift..];
        } else {
            let pad = shift - frac.len();
            if pad > 64 {
                // No non-zero digit survives that many places in range.
                let all_zero = p.int.chars().chain(p.frac.chars()).all(|c| c == '0');
                return (all_zero && digits_valid(p.frac, p.base)).then_some(0);
            }
            int.push_str(frac);
            int.extend(core::iter::repeat_n('0', pad));
            frac = "";
        }
    } else if exponent < 0 {
        let shift = usize::try_from(exponent.unsigned_abs()).unwrap_or(usize::MAX);
        if shift >= int.len() {
            let valid = digits_valid(p.int, p.base) && digits_valid(p.frac, p.base);
            return valid.then_some(0);
        }
        let split = int.len() - shift;
        carried = int.split_off(split);
    }

    if !digits_valid(&carried, p.base) || !digits_valid(frac, p.base) {
        return None;
    }
    if int.is_empty() {
        return Some(0);
    }
    let signed = format!("{}{}", p.sign, int);
    i64::from_str_radix(&signed, p.base).ok()
}

fn long_from_arc(a: Arc<'_>) -> Option<i64> {
    if a.is_empty() || !digits_valid(a.frac, 10) {
        return None;
    }

    let mut seconds: i64 = 0;
    if !a.deg.is_empty() {
        seconds = a.deg.parse::<i64>().ok()?.checked_mul(3600)?;
    }
    if !a.min.is_empty() {
        let min = a.min.parse::<i64>().ok()?.checked_mul(60)?;
        seconds = seconds.checked_add(min)?;
    }
    if !a.sec.is_empty() {
        seconds = seconds.checked_add(a.sec.parse::<i64>().ok()?)?;
    }

    let degrees = seconds / 3600;
    Some(if a.is_negative() { -degrees } else { degrees })
}

#[cfg(not(feature = "perf_lexical"))]
#[inline]
fn parse_decimal(s: &str) -> Option<f64> {
    s.parse::<f64>().ok()
}

#[cfg(feature = "perf_lexical")]
#[inline]
fn parse_decimal(s: &str) -> Option<f64> {
    lexical_core::parse::<f64>(s.as_bytes()).ok()
}

fn parse_basic_real(text: &str) -> Option<f64> {
    let b = text.as_bytes();
    let mut i = 0usize;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let mut mantissa_digits = 0usize;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    let mut comma = false;
    if i < b.len() && (b[i] == b'.' || b[i] == b',') {
        comma = b[i] == b',';
        i += 1;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if i < b.len() && b[i] == b'e' {
        i += 1;
        if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
            i += 1;
        }
        let start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == start {
            return None;
        }
    }
    if i != b.len() {
        return None;
    }

    if comma {
        parse_decimal(&text.replacen(',', ".", 1))
    } else {
        parse_decimal(text)
    }
}

#[inline]
fn signed(negative: bool, magnitude: f64) -> f64 {
    if negative { -magnitude } else { magnitude }
}

/// `acc * base^exponent`, staying accurate for exponents whose power alone
/// would leave the `f64` range.
fn scale(acc: f64, base: u32, exponent: i64) -> f64 {
    if acc == 0.0 {
        return 0.0;
    }
    // acc lies in [1, 2^54]; beyond these bounds the result is decided.
    if exponent > 2200 {
        return f64::INFINITY;
    }
    if exponent < -2200 {
        return 0.0;
    }
    let b = f64::from(base);
    let e = exponent as i32;
    if e >= 0 {
        return acc * b.powi(e);
    }
    let p = b.powi(-e);
    if p.is_finite() {
        acc / p
    } else {
        let half = -e / 2;
        acc / b.powi(half) / b.powi(-e - half)
    }
}

fn real_from_positional(p: Positional<'_>) -> Option<f64> {
    let negative = p.sign == "-";

    let exponent = if p.exp.is_empty() {
        0
    } else {
        match i64::from_str_radix(p.exp, p.base) {
            Ok(e) => e,
            Err(_) => {
                let magnitude = p.exp.trim_start_matches(['+', '-']);
                let all_valid = !magnitude.is_empty()
                    && digits_valid(magnitude, p.base)
                    && digits_valid(p.int, p.base)
                    && digits_valid(p.frac, p.base);
                if !all_valid {
                    return None;
                }
                let magnitude = if p.exp.starts_with('-') { 0.0 } else { f64::INFINITY };
                return Some(signed(negative, magnitude));
            }
        }
    };

    // Digits are summed as exact integers in at most two chunks; the second
    // chunk is small enough that whatever follows cannot change the result
    // and is only checked for legality.
    let b = f64::from(p.base);
    let point = p.int.chars().count() as i64;
    let mut cutoff = ((1u64 << 48) / u64::from(p.base)) as f64;
    let mut consumed: i64 = 0;
    let mut total = 0.0f64;
    let mut digits = p.int.chars().chain(p.frac.chars());

    for _ in 0..2 {
        let mut acc = 0.0f64;
        let mut took = false;
        for c in digits.by_ref() {
            let d = c.to_digit(p.base)?;
            acc = acc * b + f64::from(d);
            consumed += 1;
            took = true;
            if acc > cutoff {
                break;
            }
        }
        if !took {
            break;
        }
        let place = exponent.saturating_add(point - consumed);
        total += scale(acc, p.base, place);
        cutoff = (1u64 << 24) as f64;
    }

    if !digits.all(|c| c.to_digit(p.base).is_some()) {
        return None;
    }
    Some(signed(negative, total))
}

fn real_from_arc(a: Arc<'_>) -> Option<f64> {
    if a.is_empty() {
        return None;
    }

    let mut out = 0.0f64;
    if !a.deg.is_empty() {
        out += a.deg.parse::<f64>().ok()?;
    }
    if !a.min.is_empty() {
        out += a.min.parse::<f64>().ok()? / 60.0;
    }
    if !(a.sec.is_empty() && a.frac.is_empty()) {
        let sec = format!("{}.{}", a.sec, a.frac);
        out += sec.parse::<f64>().ok()? / 3600.0;
    }
    Some(signed(a.is_negative(), out))
}

/// Render a double as plain decimal text: the shortest digits that read back
/// to the same value, never in exponent notation. `-0` prints as `0` and
/// non-finite values as `inf`, `-inf` and `nan`.
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return String::from("nan");
    }
    if value.is_infinite() {
        return String::from(if value < 0.0 { "-inf" } else { "inf" });
    }
    if value == 0.0 {
        return String::from("0");
    }

    let mut buf = ryu::Buffer::new();
    let (digits, point) = significant_digits(buf.format_finite(value.abs()));
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    place_point(&mut out, &digits, point);
    out
}

/// Split ryu output into its significant digits and the position of the
/// decimal point counted from the first of them.
fn significant_digits(raw: &str) -> (String, i32) {
    let (mantissa, exp) = match raw.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (raw, 0),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mut digits: String = int.chars().chain(frac.chars()).collect();
    let leading = digits.len() - digits.trim_start_matches('0').len();
    digits.drain(..leading);
    digits.truncate(digits.trim_end_matches('0').len());
    (digits, int.len() as i32 + exp - leading as i32)
}

fn place_point(out: &mut String, digits: &str, point: i32) {
    let len = digits.len() as i32;
    if point <= 0 {
        out.push_str("0.");
        out.extend(core::iter::repeat_n('0', point.unsigned_abs() as usize));
        out.push_str(digits);
    } else if point >= len {
        out.push_str(digits);
        out.extend(core::iter::repeat_n('0', (point - len) as usize));
    } else {
        let (int, frac) = digits.split_at(point as usize);
        out.push_str(int);
        out.push('.');
        out.push_str(frac);
    }
}
