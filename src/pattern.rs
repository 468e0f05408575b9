//! Segment to output pin remapping
//!
//! Boards do not always wire `Q0..Q7` of the shift register to segments
//! `A..G, DP` in order. A layout string names, for every output bit, the
//! segment that drives it: `"ABCDEFG."` is the default, `"GFEDCBA."`
//! reverses the seven segments and keeps the dot on `Q7`.

/// Index of the decimal point in a [`PatternMap`]
pub const DOT_SEGMENT: usize = 7;

/// Output bit mask for each logical segment `A..G, DP`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PatternMap {
    map: [u8; 8],
    remap: bool,
}

impl PatternMap {
    /// Segment `i` drives output bit `i`
    pub const IDENTITY: Self = Self {
        map: [
            0b0000_0001,
            0b0000_0010,
            0b0000_0100,
            0b0000_1000,
            0b0001_0000,
            0b0010_0000,
            0b0100_0000,
            0b1000_0000,
        ],
        remap: false,
    };

    /// Build a map from an eight character layout.
    ///
    /// Position `i` names the segment driving output bit `i`: `A`-`G`
    /// (either case) or `.` for the decimal point. Any other character
    /// leaves that output unused. A segment may drive several outputs.
    pub fn from_layout(layout: &[u8; 8]) -> Self {
        let mut map = [0u8; 8];

        for (bit, &c) in layout.iter().enumerate() {
            let segment = match c {
                b'A'..=b'G' => usize::from(c - b'A'),
                b'a'..=b'g' => usize::from(c - b'a'),
                b'.' => DOT_SEGMENT,
                _ => continue,
            };
            map[segment] |= 1 << bit;
        }

        Self {
            map,
            remap: map != Self::IDENTITY.map,
        }
    }

    /// True when the map is the default `"ABCDEFG."` layout
    pub fn is_identity(&self) -> bool {
        !self.remap
    }

    /// Output bits driven by `segment` (0 = A .. 7 = DP)
    pub fn outputs(&self, segment: usize) -> Option<u8> {
        self.map.get(segment).copied()
    }

    /// Output bits driven by the decimal point
    pub fn dot(&self) -> u8 {
        self.map[DOT_SEGMENT]
    }

    /// Translate a font mask into the bits to shift out
    pub fn apply(&self, mask: u8) -> u8 {
        if !self.remap {
            return mask;
        }

        self.map
            .iter()
            .enumerate()
            .filter(|&(segment, _)| mask & (1 << segment) != 0)
            .fold(0, |out, (_, bits)| out | bits)
    }
}

impl Default for PatternMap {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO: u8 = 0b0011_1111;

    #[test]
    fn test_default_is_identity() {
        let map = PatternMap::default();
        assert!(map.is_identity());
        assert_eq!(map.dot(), 0b1000_0000);
        for mask in 0..=255u8 {
            assert_eq!(map.apply(mask), mask);
        }
    }

    #[test]
    fn test_canonical_layout_is_identity() {
        assert_eq!(PatternMap::from_layout(b"ABCDEFG."), PatternMap::IDENTITY);
        assert!(PatternMap::from_layout(b"abcdefg.").is_identity());
    }

    #[test]
    fn test_reversed_layout() {
        let map = PatternMap::from_layout(b"GFEDCBA.");
        assert!(!map.is_identity());
        assert_eq!(map.outputs(0), Some(0b0100_0000));
        assert_eq!(map.outputs(6), Some(0b0000_0001));
        assert_eq!(map.dot(), 0b1000_0000);
        assert_eq!(map.apply(ZERO), 0b0111_1110);
    }

    #[test]
    fn test_outputs_out_of_range() {
        let map = PatternMap::default();
        assert_eq!(map.outputs(DOT_SEGMENT), Some(0b1000_0000));
        assert_eq!(map.outputs(8), None);
        assert_eq!(map.outputs(usize::MAX), None);
    }

    #[test]
    fn test_fan_out() {
        // Segment A on both Q0 and Q7, no dot
        let map = PatternMap::from_layout(b"ABCDEFGA");
        assert!(!map.is_identity());
        assert_eq!(map.outputs(0), Some(0b1000_0001));
        assert_eq!(map.dot(), 0);
        assert_eq!(map.apply(0b0000_0001), 0b1000_0001);
        assert_eq!(map.apply(0b1000_0000), 0);
    }

    #[test]
    fn test_unmapped_outputs() {
        let map = PatternMap::from_layout(b"AB?DEFG ");
        assert_eq!(map.outputs(2), Some(0));
        assert_eq!(map.dot(), 0);
        // C and DP have nowhere to go
        assert_eq!(map.apply(0b1000_0111), 0b0000_0011);
    }

    #[test]
    fn test_unset_segments_contribute_nothing() {
        let map = PatternMap::from_layout(b"BADCFEG.");
        assert_eq!(map.apply(0), 0);
        assert_eq!(map.apply(0b0000_0001), 0b0000_0010);
        assert_eq!(map.apply(0b0100_0000), 0b0100_0000);
    }
}
