use std::fmt;

/// Transaction fields embedded into an issued QR code.
///
/// `amount` is carried as decimal text and never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDescriptor {
    pub code: String,
    pub bar_id: u64,
    pub amount: String,
}

impl TransactionDescriptor {
    pub fn new(code: impl Into<String>, bar_id: u64, amount: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            bar_id,
            amount: amount.into(),
        }
    }

    /// Canonical payload string: `CODE:{code}|BAR:{bar_id}|AMOUNT:{amount}`.
    ///
    /// Fields are written verbatim. A `|` or `:` inside `code` or `amount`
    /// makes the result ambiguous to split; readers of existing codes depend
    /// on this exact text, so no escaping is applied.
    pub fn payload(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TransactionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CODE:{}|BAR:{}|AMOUNT:{}",
            self.code, self.bar_id, self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_matches_canonical_layout() {
        let tx = TransactionDescriptor::new("QR-ABC12345", 1, "50.00");
        assert_eq!(tx.payload(), "CODE:QR-ABC12345|BAR:1|AMOUNT:50.00");
    }

    #[test]
    fn payload_is_deterministic() {
        let a = TransactionDescriptor::new("QR-X", 42, "1000.99");
        let b = TransactionDescriptor::new("QR-X", 42, "1000.99");
        assert_eq!(a.payload(), b.payload());
    }

    #[test]
    fn delimiters_inside_fields_are_not_escaped() {
        let tx = TransactionDescriptor::new("QR-A|B", 7, "1:2");
        assert_eq!(tx.payload(), "CODE:QR-A|B|BAR:7|AMOUNT:1:2");
    }

    #[test]
    fn amount_is_not_normalized() {
        let tx = TransactionDescriptor::new("QR-ABC", 3, "0050.000");
        assert!(tx.payload().ends_with("|AMOUNT:0050.000"));
    }
}
