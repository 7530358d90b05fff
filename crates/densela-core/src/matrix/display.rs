//! `Display` formatting for [`Matrix`].

use core::fmt;

use crate::Scalar;

use super::Matrix;

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "matrix([], shape=({}, {}))", self.rows, self.cols);
        }

        writeln!(f, "matrix([")?;
        for r in 0..self.rows {
            write!(f, "  [")?;
            for (c, v) in self.row(r).iter().enumerate() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                match f.precision() {
                    Some(p) => write!(f, "{v:.p$}")?,
                    None => write!(f, "{v}")?,
                }
            }
            if r + 1 < self.rows {
                writeln!(f, "],")?;
            } else {
                writeln!(f, "]")?;
            }
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_2d() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let s = format!("{m}");
        assert!(s.starts_with("matrix("));
        assert!(s.contains("[1, 2]"));
        assert!(s.contains("[3, 4]"));
    }

    #[test]
    fn test_display_precision() {
        let m = Matrix::from_rows(&[[1.0 / 3.0]]).unwrap();
        assert!(format!("{m:.3}").contains("[0.333]"));
    }

    #[test]
    fn test_display_empty() {
        let m = Matrix::<f64>::zeros(0, 3);
        assert_eq!(format!("{m}"), "matrix([], shape=(0, 3))");
    }
}
