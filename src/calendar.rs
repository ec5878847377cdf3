use crate::scheduler::SchedError;
use chrono::NaiveDate;
use std::ops::Range;

/// Longueur d'une fenêtre (semaine de planning).
pub const WINDOW_LEN: usize = 7;

/// Période de planification, bornes incluses ; `end > start` garanti par `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    start: NaiveDate,
    end: NaiveDate,
}

impl Calendar {
    /// Crée un calendrier en validant que `end > start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SchedError> {
        if end <= start {
            return Err(SchedError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Nombre de jours (bornes incluses).
    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .collect()
    }
}

/// Tranche contiguë de dates ; toutes font 7 jours sauf éventuellement la dernière.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    pub index: usize,
    /// Indice (depuis le début du calendrier) du premier jour de la fenêtre.
    pub offset: usize,
    pub dates: &'a [NaiveDate],
}

impl Window<'_> {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Indices de jour couverts par la fenêtre.
    pub fn day_indices(&self) -> Range<usize> {
        self.offset..self.offset + self.dates.len()
    }

    pub fn last_day_index(&self) -> Option<usize> {
        self.day_indices().last()
    }
}

/// Découpe les dates en fenêtres successives de 7 jours.
pub fn partition(dates: &[NaiveDate]) -> Vec<Window<'_>> {
    dates
        .chunks(WINDOW_LEN)
        .enumerate()
        .map(|(index, chunk)| Window {
            index,
            offset: index * WINDOW_LEN,
            dates: chunk,
        })
        .collect()
}
