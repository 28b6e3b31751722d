use std::fmt;

/// The closed set of pitches a score can name.
///
/// `Rest` comes first so that every sounding note's ordinal, minus one, is
/// its half-step offset above the A440 tuning reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Note {
    Rest,
    A4,
    As4,
    B4,
    C4,
    Cs4,
    D4,
    Ds4,
    E4,
    F4,
    Fs4,
    G4,
    Gs4,
    A5,
}

impl Note {
    /// Every pitch in ordinal order. The choir spawns one voice per entry.
    pub const ALL: [Note; 14] = [
        Note::Rest,
        Note::A4,
        Note::As4,
        Note::B4,
        Note::C4,
        Note::Cs4,
        Note::D4,
        Note::Ds4,
        Note::E4,
        Note::F4,
        Note::Fs4,
        Note::G4,
        Note::Gs4,
        Note::A5,
    ];

    /// Arena index: `Rest` is 0, `A5` is 13.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Frequency in Hz, `None` for the rest.
    ///
    /// Equal temperament from A440: each half step up multiplies the
    /// frequency by 2^(1/12).
    pub fn frequency(self) -> Option<f64> {
        match self.index() {
            0 => None,
            n => Some(440.0 * 2.0_f64.powf((n - 1) as f64 / 12.0)),
        }
    }

    /// The token form used in score files (sharps written with a trailing
    /// `S`, e.g. `C4S`).
    pub const fn token(self) -> &'static str {
        match self {
            Note::Rest => "REST",
            Note::A4 => "A4",
            Note::As4 => "A4S",
            Note::B4 => "B4",
            Note::C4 => "C4",
            Note::Cs4 => "C4S",
            Note::D4 => "D4",
            Note::Ds4 => "D4S",
            Note::E4 => "E4",
            Note::F4 => "F4",
            Note::Fs4 => "F4S",
            Note::G4 => "G4",
            Note::Gs4 => "G4S",
            Note::A5 => "A5",
        }
    }

    /// Parse a score token such as `A4`, `C4S`, or `REST`, case-insensitively.
    pub fn from_token(token: &str) -> Option<Note> {
        let token = token.to_ascii_uppercase();
        Note::ALL.into_iter().find(|note| note.token() == token)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a440_is_the_tuning_reference() {
        assert_eq!(Note::A4.frequency(), Some(440.0));
    }

    #[test]
    fn a5_is_an_octave_up() {
        let a5 = Note::A5.frequency().unwrap();
        assert!((a5 - 880.0).abs() < 1e-9);
    }

    #[test]
    fn the_rest_is_silent() {
        assert_eq!(Note::Rest.frequency(), None);
    }

    #[test]
    fn neighbors_are_a_half_step_apart() {
        let half_step = 2.0_f64.powf(1.0 / 12.0);
        for pair in Note::ALL[1..].windows(2) {
            let ratio = pair[1].frequency().unwrap() / pair[0].frequency().unwrap();
            assert!((ratio - half_step).abs() < 1e-9);
        }
    }

    #[test]
    fn tokens_round_trip() {
        for note in Note::ALL {
            assert_eq!(Note::from_token(note.token()), Some(note));
        }
    }

    #[test]
    fn tokens_are_case_insensitive() {
        assert_eq!(Note::from_token("a4s"), Some(Note::As4));
        assert_eq!(Note::from_token("rest"), Some(Note::Rest));
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert_eq!(Note::from_token("Z9"), None);
        assert_eq!(Note::from_token("A4#"), None);
        assert_eq!(Note::from_token(""), None);
    }

    #[test]
    fn ordinals_match_arena_positions() {
        for (position, note) in Note::ALL.into_iter().enumerate() {
            assert_eq!(note.index(), position);
        }
    }
}
