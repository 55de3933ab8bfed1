//! `color_mix` — hex color blending exposed to templates.
//!
//! `color_mix(fg='ff0000', bg='0000ff', f=0.5)` blends the foreground
//! toward the background: `f` weighs the background, so `f=0.0` yields
//! `fg` and `f=1.0` yields `bg`. The orientation is a fixed contract.

use std::collections::HashMap;

use tera::Value;

/// Parse a 6-digit hex color string into `(r, g, b)` channels.
fn parse_color(value: &str) -> Option<(u8, u8, u8)> {
    if value.len() != 6 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&value[0..2], 16).ok()?;
    let g = u8::from_str_radix(&value[2..4], 16).ok()?;
    let b = u8::from_str_radix(&value[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Blend one channel pair, truncating toward negative infinity.
/// Out-of-range factors saturate at the byte boundary.
fn blend_channel(fg: u8, bg: u8, factor: f64) -> u8 {
    (f64::from(fg) * (1.0 - factor) + f64::from(bg) * factor).floor() as u8
}

/// Blend `fg` toward `bg` by `factor`, formatted as lowercase hex.
pub fn mix(fg: (u8, u8, u8), bg: (u8, u8, u8), factor: f64) -> String {
    format!(
        "{:02x}{:02x}{:02x}",
        blend_channel(fg.0, bg.0, factor),
        blend_channel(fg.1, bg.1, factor),
        blend_channel(fg.2, bg.2, factor),
    )
}

fn color_arg(args: &HashMap<String, Value>, name: &str) -> tera::Result<(u8, u8, u8)> {
    let value = args
        .get(name)
        .ok_or_else(|| tera::Error::msg(format!("color_mix requires a '{name}' parameter")))?;
    let text = tera::try_get_value!("color_mix", name, String, value);
    parse_color(&text).ok_or_else(|| {
        tera::Error::msg(format!("invalid color passed as '{name}' parameter: {value}"))
    })
}

/// Tera function backing `color_mix` in template expressions.
pub fn color_mix(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let fg = color_arg(args, "fg")?;
    let bg = color_arg(args, "bg")?;
    let factor = match args.get("f") {
        Some(value) => tera::try_get_value!("color_mix", "f", f64, value),
        None => return Err(tera::Error::msg("color_mix requires a 'f' parameter")),
    };
    Ok(mix(fg, bg, factor).into())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn args(fg: &str, bg: &str, f: f64) -> HashMap<String, Value> {
        let mut map = HashMap::new();
        map.insert("fg".to_string(), Value::from(fg));
        map.insert("bg".to_string(), Value::from(bg));
        map.insert("f".to_string(), Value::from(f));
        map
    }

    #[test]
    fn factor_one_yields_background() {
        assert_eq!(mix((0xff, 0x00, 0x00), (0x00, 0x00, 0xff), 1.0), "0000ff");
    }

    #[test]
    fn factor_zero_yields_foreground() {
        assert_eq!(mix((0xff, 0x00, 0x00), (0x00, 0x00, 0xff), 0.0), "ff0000");
    }

    #[test]
    fn half_factor_floors_the_channel_average() {
        // floor(0xff * 0.5) = 127 = 0x7f on red and blue, green stays 0.
        assert_eq!(mix((0xff, 0x00, 0x00), (0x00, 0x00, 0xff), 0.5), "7f007f");
    }

    #[test]
    fn channels_blend_independently() {
        assert_eq!(mix((0x10, 0x20, 0x30), (0x20, 0x40, 0x60), 0.5), "183048");
    }

    #[test]
    fn out_of_range_factor_saturates() {
        assert_eq!(mix((0x00, 0x00, 0x00), (0xff, 0xff, 0xff), 2.0), "ffffff");
        assert_eq!(mix((0x00, 0x00, 0x00), (0xff, 0xff, 0xff), -1.0), "000000");
    }

    #[test]
    fn function_blends_named_arguments() {
        let result = color_mix(&args("ff0000", "0000ff", 0.5)).expect("mix");
        assert_eq!(result, Value::from("7f007f"));
    }

    #[test]
    fn invalid_hex_is_rejected() {
        for bad in ["zzzzzz", "fff", "ff00001", "#ff0000", ""] {
            let err = color_mix(&args(bad, "0000ff", 0.5)).expect_err("must fail");
            assert!(err.to_string().contains("invalid color"), "{bad}: {err}");
        }
    }

    #[test]
    fn missing_argument_is_rejected() {
        let mut incomplete = args("ff0000", "0000ff", 0.5);
        incomplete.remove("f");
        let err = color_mix(&incomplete).expect_err("must fail");
        assert!(err.to_string().contains("'f' parameter"));
    }
}
