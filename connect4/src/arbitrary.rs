use quickcheck::{Arbitrary, Gen};

use crate::{Event, WIDTH};

/// Columns to drop pieces into, all of them on the board.
///
/// Columns may well be full by the time they are played.
#[derive(Clone, Debug)]
pub struct ColumnSequence {
    pub columns: Vec<usize>,
}

impl Arbitrary for ColumnSequence {
    fn arbitrary(g: &mut Gen) -> Self {
        let columns = Vec::<u8>::arbitrary(g)
            .into_iter()
            .map(|c| c as usize % WIDTH)
            .collect();
        ColumnSequence { columns }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let shrunk = self.columns.shrink();
        Box::new(shrunk.map(|columns| ColumnSequence { columns }))
    }
}

/// Input as a presentation layer might send it: mostly valid column
/// selections, with the occasional bogus column or reset.
#[derive(Clone, Debug)]
pub struct EventSequence {
    pub events: Vec<Event>,
}

impl Arbitrary for Event {
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 32 {
            0 => Event::ResetRequested,
            1 => Event::ColumnSelected {
                column: i64::arbitrary(g),
            },
            2 => Event::ColumnSelected {
                column: -(i64::from(u8::arbitrary(g)) + 1),
            },
            3 => Event::ColumnSelected {
                column: WIDTH as i64,
            },
            _ => Event::ColumnSelected {
                column: i64::from(u8::arbitrary(g)) % WIDTH as i64,
            },
        }
    }
}

impl Arbitrary for EventSequence {
    fn arbitrary(g: &mut Gen) -> Self {
        EventSequence {
            events: Vec::arbitrary(g),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let shrunk = self.events.shrink();
        Box::new(shrunk.map(|events| EventSequence { events }))
    }
}
