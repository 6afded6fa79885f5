use crate::app::{AppState, Cursor};
use crate::timetable::{Timetable, Weekday};

pub const EMPTY_DAY_PLACEHOLDER: &str = "No classes scheduled";

/// Rows taken by the bordered title bar above the grid.
pub const TITLE_ROWS: u16 = 3;
const COLUMN_BORDER: u16 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub days: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub day: Weekday,
    pub is_selected: bool,
    pub entries: Vec<EntryCard>,
    pub placeholder: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryCard {
    pub position: usize,
    pub name: String,
    pub time_range: String,
    pub room_label: Option<String>,
    pub is_selected: bool,
}

impl WeekLayout {
    pub fn column(&self, day: Weekday) -> &DayColumn {
        &self.days[day.index()]
    }

    pub fn total_cards(&self) -> usize {
        self.days.iter().map(|d| d.entries.len()).sum()
    }

    /// Smallest frame height that fits the title and every card when the
    /// grid spans `frame_width` cells.
    pub fn capture_height(&self, frame_width: u16) -> u16 {
        let column_width = frame_width / Weekday::ALL.len() as u16;
        let text_width = usize::from(column_width.saturating_sub(COLUMN_BORDER).max(1));
        let body = self.days.iter().map(|d| d.body_rows(text_width)).max().unwrap_or(0);
        let rows = usize::from(TITLE_ROWS + COLUMN_BORDER) + body;
        u16::try_from(rows).unwrap_or(u16::MAX)
    }
}

impl DayColumn {
    /// Rows the column body takes once word-wrapped to `text_width`. Each
    /// card is followed by a blank spacer row.
    pub fn body_rows(&self, text_width: usize) -> usize {
        let placeholder = self.placeholder.map_or(0, |text| wrapped_rows(text, text_width));
        let cards: usize = self.entries.iter().map(|card| card.rows(text_width) + 1).sum();
        placeholder + cards
    }
}

impl EntryCard {
    fn rows(&self, text_width: usize) -> usize {
        wrapped_rows(&self.name, text_width)
            + wrapped_rows(&self.time_range, text_width)
            + self.room_label.as_deref().map_or(0, |room| wrapped_rows(room, text_width))
    }
}

/// Greedy word wrap; words wider than the line are split across rows.
fn wrapped_rows(text: &str, width: usize) -> usize {
    let width = width.max(1);
    let mut rows = 1;
    let mut used = 0;

    for word in text.split_whitespace() {
        let mut len = word.chars().count();
        let needed = if used == 0 { len } else { used + 1 + len };
        if needed <= width {
            used = needed;
            continue;
        }
        if used > 0 {
            rows += 1;
        }
        while len > width {
            rows += 1;
            len -= width;
        }
        used = len;
    }

    rows
}

/// Selection highlights are left out while the view is being captured.
pub fn calculate_layout(state: &AppState) -> WeekLayout {
    let cursor = (!state.capture_mode).then_some(state.cursor);
    layout_for(&state.timetable, cursor)
}

pub fn layout_for(timetable: &Timetable, cursor: Option<Cursor>) -> WeekLayout {
    let days = Weekday::ALL
        .iter()
        .map(|&day| {
            let day_selected = cursor.is_some_and(|c| c.day == day);
            let entries: Vec<EntryCard> = timetable
                .day(day)
                .iter()
                .enumerate()
                .map(|(position, entry)| EntryCard {
                    position,
                    name: entry.name.clone(),
                    time_range: entry.time_range_label(),
                    room_label: entry.room.as_ref().map(|room| format!("Professor: {}", room)),
                    is_selected: day_selected && cursor.is_some_and(|c| c.position == position),
                })
                .collect();

            DayColumn {
                day,
                is_selected: day_selected,
                placeholder: entries.is_empty().then_some(EMPTY_DAY_PLACEHOLDER),
                entries,
            }
        })
        .collect();

    WeekLayout { days }
}
