use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::fs::{self, File};
use std::path::Path;

/// Defines the format of a keyword field
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum FieldFormat {
    /// Text (A8)
    Text,

    /// Integer (I)
    Integer,

    /// Floating point number (F)
    Float,
}

/// Holds the value of a keyword field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Number(v) => write!(f, "{:e}", v),
            FieldValue::Text(v) => write!(f, "{}", v),
        }
    }
}

/// Holds a single field of an input deck card
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeywordField {
    /// Name of the field (e.g., ALPHA)
    pub name: String,

    /// Card number (one-based)
    pub card: usize,

    /// Position in the card (one-based)
    pub position: usize,

    /// Format kind
    pub format: FieldFormat,

    /// Value
    pub value: FieldValue,
}

/// Holds the ordered fields of a material keyword
///
/// Text formatting into fixed-width cards is left to the consumer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    /// Keyword title (e.g., *MAT_CSCM)
    pub title: String,

    /// All fields in card order
    pub fields: Vec<KeywordField>,

    /// Current card while building
    #[serde(skip)]
    card: usize,
}

impl Keyword {
    /// Allocates a new instance
    pub fn new(title: &str) -> Self {
        Keyword {
            title: title.to_string(),
            fields: Vec::new(),
            card: 0,
        }
    }

    /// Starts a new card
    pub fn card(&mut self) -> &mut Self {
        self.card += 1;
        self
    }

    /// Appends a floating point field to the current card
    pub fn float(&mut self, name: &str, value: f64) -> &mut Self {
        self.push(name, FieldFormat::Float, FieldValue::Number(value))
    }

    /// Appends an integer field to the current card
    pub fn integer(&mut self, name: &str, value: i64) -> &mut Self {
        self.push(name, FieldFormat::Integer, FieldValue::Integer(value))
    }

    /// Appends a text field to the current card
    pub fn text(&mut self, name: &str, value: &str) -> &mut Self {
        self.push(name, FieldFormat::Text, FieldValue::Text(value.to_string()))
    }

    fn push(&mut self, name: &str, format: FieldFormat, value: FieldValue) -> &mut Self {
        let card = usize::max(self.card, 1);
        let position = self.fields.iter().filter(|f| f.card == card).count() + 1;
        self.fields.push(KeywordField {
            name: name.to_string(),
            card,
            position,
            format,
            value,
        });
        self
    }

    /// Returns the number of cards
    pub fn ncard(&self) -> usize {
        self.fields.iter().map(|f| f.card).max().unwrap_or(0)
    }

    /// Returns the field with the given name
    pub fn get(&self, name: &str) -> Option<&KeywordField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the numeric value of a field
    pub fn number(&self, name: &str) -> Result<f64, StrError> {
        match self.get(name) {
            Some(field) => match field.value {
                FieldValue::Number(v) => Ok(v),
                FieldValue::Integer(v) => Ok(v as f64),
                FieldValue::Text(_) => Err("keyword field is not numeric"),
            },
            None => Err("keyword field is not available"),
        }
    }

    /// Writes a JSON file with the fields
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer_pretty(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for field in &self.fields {
            writeln!(f, "{:>4} {:>2} {:<8} {}", field.card, field.position, field.name, field.value)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
