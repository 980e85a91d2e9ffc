//! Built-in ΔT = TT − UT1 model.
//!
//! Piecewise polynomials of Espenak & Meeus (NASA Five Millennium Canon of
//! Solar Eclipses, 2006), public domain. Used only when the leap-second
//! path is unavailable and the caller permits a ΔT fallback.

/// Decimal year for a calendar month, taken at mid-month.
pub fn decimal_year(year: i32, month: u32) -> f64 {
    year as f64 + (month as f64 - 0.5) / 12.0
}

/// ΔT in seconds for a decimal year.
pub fn delta_t_seconds(y: f64) -> f64 {
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };

    if y < -500.0 {
        long_term(y)
    } else if y < 500.0 {
        let u = y / 100.0;
        poly(
            u,
            &[
                10583.6,
                -1014.41,
                33.78311,
                -5.952053,
                -0.1798452,
                0.022174192,
                0.0090316521,
            ],
        )
    } else if y < 1600.0 {
        let u = (y - 1000.0) / 100.0;
        poly(
            u,
            &[
                1574.2,
                -556.01,
                71.23472,
                0.319781,
                -0.8503463,
                -0.005050998,
                0.0083572073,
            ],
        )
    } else if y < 1700.0 {
        let t = y - 1600.0;
        poly(t, &[120.0, -0.9808, -0.01532, 1.0 / 7129.0])
    } else if y < 1800.0 {
        let t = y - 1700.0;
        poly(
            t,
            &[8.83, 0.1603, -0.005_928_5, 0.000_133_36, -1.0 / 1_174_000.0],
        )
    } else if y < 1860.0 {
        let t = y - 1800.0;
        poly(
            t,
            &[
                13.72,
                -0.332_447,
                0.006_861_2,
                0.004_111_6,
                -0.000_374_36,
                0.000_012_127_2,
                -0.000_000_169_9,
                0.000_000_000_875,
            ],
        )
    } else if y < 1900.0 {
        let t = y - 1860.0;
        poly(
            t,
            &[
                7.62,
                0.5737,
                -0.251_754,
                0.016_806_68,
                -0.000_447_362_4,
                1.0 / 233_174.0,
            ],
        )
    } else if y < 1920.0 {
        let t = y - 1900.0;
        poly(t, &[-2.79, 1.494_119, -0.059_893_9, 0.006_196_6, -0.000_197])
    } else if y < 1941.0 {
        let t = y - 1920.0;
        poly(t, &[21.20, 0.844_93, -0.076_100, 0.002_093_6])
    } else if y < 1961.0 {
        let t = y - 1950.0;
        poly(t, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0])
    } else if y < 1986.0 {
        let t = y - 1975.0;
        poly(t, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0])
    } else if y < 2005.0 {
        let t = y - 2000.0;
        poly(
            t,
            &[
                63.86,
                0.3345,
                -0.060_374,
                0.001_727_5,
                0.000_651_814,
                0.000_023_735_99,
            ],
        )
    } else if y < 2050.0 {
        let t = y - 2000.0;
        poly(t, &[62.92, 0.32217, 0.005589])
    } else if y < 2150.0 {
        long_term(y) - 0.5628 * (2150.0 - y)
    } else {
        long_term(y)
    }
}

/// Horner evaluation, coefficients in ascending order.
fn poly(x: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_anchors() {
        assert!((delta_t_seconds(2000.0) - 63.86).abs() < 1e-9);
        assert!((delta_t_seconds(1950.0) - 29.07).abs() < 1e-9);
        assert!((delta_t_seconds(1975.0) - 45.45).abs() < 1e-9);
        assert!((delta_t_seconds(1900.0) - -2.79).abs() < 1e-9);
    }

    #[test]
    fn modern_values_plausible() {
        let dt = delta_t_seconds(decimal_year(2024, 6));
        assert!((65.0..80.0).contains(&dt), "ΔT(2024) = {dt}");
    }

    #[test]
    fn continuous_at_2050() {
        let before = delta_t_seconds(2049.999_999);
        let after = delta_t_seconds(2050.0);
        assert!((before - after).abs() < 2.0, "{before} vs {after}");
    }

    #[test]
    fn decimal_year_midmonth() {
        assert!((decimal_year(2000, 1) - (2000.0 + 0.5 / 12.0)).abs() < 1e-12);
    }
}
