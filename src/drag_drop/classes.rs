use crate::settings::ClassSettings;

/// Fully-qualified class names used as element markers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNames {
    pub draggable: String,
    pub dragging: String,
    pub drag_over: String,
    pub drop_zone_active: String,
    pub column_header: String,
    pub card: String,
    pub drop_indicator: String,
    pub drop_indicator_column: String,
    pub drop_indicator_card: String,
}

impl ClassNames {
    pub fn with_prefix(prefix: &str) -> Self {
        let name = |suffix: &str| format!("{prefix}-{suffix}");
        Self {
            draggable: name("draggable"),
            dragging: name("dragging"),
            drag_over: name("drag-over"),
            drop_zone_active: name("drop-zone-active"),
            column_header: name("column-header"),
            card: name("card"),
            drop_indicator: name("drop-indicator"),
            drop_indicator_column: name("drop-indicator-column"),
            drop_indicator_card: name("drop-indicator-card"),
        }
    }
}

impl From<&ClassSettings> for ClassNames {
    fn from(settings: &ClassSettings) -> Self {
        Self::with_prefix(&settings.prefix)
    }
}
