use std::error::Error;
use std::fmt;

pub type ParseResult<T> = Result<T, ParseError>;

/// Order fields that every confirmation must contain.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ReceiptField {
    DeliveryDate,
    DeliveryCost,
    VoucherSavings,
}

impl fmt::Display for ReceiptField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReceiptField::DeliveryDate => "'Delivery date' line",
            ReceiptField::DeliveryCost => "'Delivery' cost line",
            ReceiptField::VoucherSavings => "'Voucher Saving' line",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// A required field is absent from the receipt text.
    MissingField { field: ReceiptField },
    /// A matched token could not be converted to a number, quantity or date.
    Format { message: String },
}

#[derive(Debug)]
pub struct ParseError {
    /// The type of error.
    pub kind: ParseErrorKind,
    /// The (line, column) location of the offending token, if there is one.
    pub location: Option<(usize, usize)>,
    source: Option<Box<dyn Error + 'static + Send + Sync>>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::MissingField { field } => {
                write!(f, "Receipt is missing the {}", field)?;
            }
            ParseErrorKind::Format { message } => {
                write!(f, "Invalid format: {}", message)?;
            }
        }
        if let Some((line, column)) = self.location {
            write!(f, " at line {} column {}", line, column)?;
        }
        Ok(())
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl ParseError {
    pub(crate) fn missing_field(field: ReceiptField) -> ParseError {
        ParseError {
            kind: ParseErrorKind::MissingField { field },
            location: None,
            source: None,
        }
    }

    pub(crate) fn format<T: ToString>(msg: T, location: (usize, usize)) -> ParseError {
        ParseError {
            kind: ParseErrorKind::Format {
                message: msg.to_string(),
            },
            location: Some(location),
            source: None,
        }
    }

    pub(crate) fn format_with_source<T, E>(msg: T, location: (usize, usize), err: E) -> ParseError
    where
        T: ToString,
        E: Error + 'static + Send + Sync,
    {
        let message = format!("{}: {}", msg.to_string(), err);
        ParseError {
            kind: ParseErrorKind::Format { message },
            location: Some(location),
            source: Some(Box::new(err)),
        }
    }

    pub fn is_missing_field(&self) -> bool {
        matches!(self.kind, ParseErrorKind::MissingField { .. })
    }
}
