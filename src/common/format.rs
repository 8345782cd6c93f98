// src/common/format.rs

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

// Format nominal ke gaya id-ID: "Rp 1.234.567". Sen dibuang,
// nilai negatif diberi tanda minus di depan.
pub fn format_rupiah(nilai: Decimal) -> String {
    let bulat = nilai.trunc().to_i128().unwrap_or(0);
    let negatif = bulat < 0;
    let digit = bulat.unsigned_abs().to_string();

    let mut kelompok: Vec<String> = Vec::new();
    let bytes = digit.as_bytes();
    let mut akhir = bytes.len();
    while akhir > 3 {
        kelompok.push(digit[akhir - 3..akhir].to_string());
        akhir -= 3;
    }
    kelompok.push(digit[..akhir].to_string());
    kelompok.reverse();

    let angka = kelompok.join(".");
    if negatif {
        format!("Rp -{angka}")
    } else {
        format!("Rp {angka}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_rupiah_kelompok_ribuan() {
        assert_eq!(format_rupiah(Decimal::from(0)), "Rp 0");
        assert_eq!(format_rupiah(Decimal::from(500)), "Rp 500");
        assert_eq!(format_rupiah(Decimal::from(100_000)), "Rp 100.000");
        assert_eq!(format_rupiah(Decimal::from(1_234_567)), "Rp 1.234.567");
    }

    #[test]
    fn format_rupiah_membuang_sen() {
        assert_eq!(format_rupiah(Decimal::new(1999_99, 2)), "Rp 1.999");
    }

    #[test]
    fn format_rupiah_negatif() {
        assert_eq!(format_rupiah(Decimal::from(-25_000)), "Rp -25.000");
    }
}
