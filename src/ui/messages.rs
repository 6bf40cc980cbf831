use serde::{Deserialize, Serialize};

/// Display language of the notifications and overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Hebrew, the language of the course site
    #[default]
    He,
    /// English
    En,
}

/// User-facing strings for one locale
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn idle_label(&self) -> String {
        // Same in both locales, matching the injected button
        "🚀 Extract Links for MP3".to_string()
    }

    pub fn running_label(&self) -> String {
        match self.locale {
            Locale::He => "מחלץ... ⏳".to_string(),
            Locale::En => "Extracting... ⏳".to_string(),
        }
    }

    pub fn done_label(&self) -> String {
        match self.locale {
            Locale::He => "✅ הועתק!".to_string(),
            Locale::En => "✅ Copied!".to_string(),
        }
    }

    pub fn progress(&self, processed: usize, total: usize) -> String {
        match self.locale {
            Locale::He => format!("מעבד {}/{}...", processed, total),
            Locale::En => format!("Processing {}/{}...", processed, total),
        }
    }

    pub fn missing_table(&self, selector: &str) -> String {
        match self.locale {
            Locale::He => format!("טבלת הסרטונים לא נמצאה! ({})", selector),
            Locale::En => format!("Video table not found! ({})", selector),
        }
    }

    pub fn no_candidates(&self) -> String {
        match self.locale {
            Locale::He => "לא נמצאו קישורים לסרטונים בטבלה!".to_string(),
            Locale::En => "No video links found in the table!".to_string(),
        }
    }

    pub fn summary(&self, count: usize) -> String {
        match self.locale {
            Locale::He => format!(
                "חולצו {} קישורים ישירים לסרטונים!\nהרשימה הועתקה ללוח.\n\nהדבק אותם ב-links.txt והרץ את הסקריפט.",
                count
            ),
            Locale::En => format!(
                "Extracted {} direct video links!\nThe list was copied to the clipboard.\n\nPaste it into links.txt and run the converter.",
                count
            ),
        }
    }
}
