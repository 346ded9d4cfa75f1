use nom::{branch::alt, bytes::complete::tag, combinator::value};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
}

impl TimeUnit {
    pub fn parse(input: &str) -> nom::IResult<&str, Self> {
        // Longest tags first, "m" would shadow "ms" and "minute"
        alt((
            value(Self::Millisecond, tag("millisecond")),
            value(Self::Millisecond, tag("ms")),
            value(Self::Second, tag("second")),
            value(Self::Second, tag("s")),
            value(Self::Minute, tag("minute")),
            value(Self::Minute, tag("m")),
            value(Self::Hour, tag("hour")),
            value(Self::Hour, tag("h")),
        ))(input)
    }

    pub fn to_duration(self, amount: u32) -> Duration {
        match self {
            Self::Millisecond => Duration::from_millis(amount as u64),
            Self::Second => Duration::from_secs(amount as u64),
            Self::Minute => Duration::from_secs(amount as u64 * 60),
            Self::Hour => Duration::from_secs(amount as u64 * 60 * 60),
        }
    }
}
