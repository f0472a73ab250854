/// Format a finite float as the shortest decimal that round-trips
///
/// Plain notation is used for decimal exponents in `-6 < n <= 21`, scientific
/// notation (`1e+300`, `5.960464477539063e-8`) otherwise.  Negative zero keeps
/// its sign.
pub fn format(value: f64) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };

    // LowerExp yields the shortest round-trip digits, e.g. "6.103515625e-5"
    let sci = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return format!("{value}");
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return format!("{value}");
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let k = digits.len() as i32;
    let n = exponent + 1;
    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat(-n as usize))
    } else {
        let (first, rest) = digits.split_at(1);
        let exp_sign = if n > 0 { "+" } else { "-" };
        if rest.is_empty() {
            format!("{first}e{exp_sign}{}", (n - 1).abs())
        } else {
            format!("{first}.{rest}e{exp_sign}{}", (n - 1).abs())
        }
    };
    format!("{sign}{body}")
}

#[cfg(test)]
mod tests {
    use super::format;

    #[test]
    fn test_zero() {
        assert_eq!(format(0.0), "0");
        assert_eq!(format(-0.0), "-0");
    }

    #[test]
    fn test_integral() {
        assert_eq!(format(1.0), "1");
        assert_eq!(format(-4.0), "-4");
        assert_eq!(format(65504.0), "65504");
        assert_eq!(format(100000.0), "100000");
        assert_eq!(format(1e21), "1e+21");
        assert_eq!(format(1e20), "100000000000000000000");
    }

    #[test]
    fn test_fractional() {
        assert_eq!(format(1.5), "1.5");
        assert_eq!(format(1.1), "1.1");
        assert_eq!(format(-4.1), "-4.1");
        assert_eq!(format(0.00006103515625), "0.00006103515625");
        assert_eq!(format(0.000001), "0.000001");
        assert_eq!(format(1363896240.5), "1363896240.5");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(format(1.0e300), "1e+300");
        assert_eq!(format(5.960464477539063e-8), "5.960464477539063e-8");
        assert_eq!(format(3.4028234663852886e38), "3.4028234663852886e+38");
        assert_eq!(format(1e-7), "1e-7");
        assert_eq!(format(-2.5e-10), "-2.5e-10");
    }
}
