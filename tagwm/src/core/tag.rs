#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tag(u32);

impl Tag {
    pub fn new(n: u32) -> Self {
        assert!(n > 0 && n <= 32);
        Self(1 << (n - 1))
    }

    pub fn from_mask(mask: u32) -> Self {
        Self(mask)
    }

    /// Mask covering the first `count` tags.
    pub fn all(count: usize) -> Self {
        if count >= 32 {
            Self(u32::MAX)
        } else {
            Self((1u32 << count) - 1)
        }
    }

    pub fn mask(self) -> u32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn intersects(self, other: Tag) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn intersection(self, other: Tag) -> Self {
        Self(self.0 & other.0)
    }

    pub fn union(self, other: Tag) -> Self {
        Self(self.0 | other.0)
    }

    pub fn toggle(self, other: Tag) -> Self {
        Self(self.0 ^ other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_correct_bitmask() {
        assert_eq!(Tag::new(1).mask(), 0b0001);
        assert_eq!(Tag::new(2).mask(), 0b0010);
        assert_eq!(Tag::new(3).mask(), 0b0100);
        assert_eq!(Tag::new(9).mask(), 1 << 8);
        assert_eq!(Tag::new(32).mask(), 1 << 31);
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_zero() {
        Tag::new(0);
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_33() {
        Tag::new(33);
    }

    #[test]
    fn test_all() {
        assert_eq!(Tag::all(9).mask(), 0x1ff);
        assert_eq!(Tag::all(1).mask(), 0b1);
        assert_eq!(Tag::all(32).mask(), u32::MAX);
    }

    #[test]
    fn test_intersects() {
        let tag1 = Tag::new(1);
        let tag2 = Tag::new(2);
        let tag12 = Tag::from_mask(0b0011);

        assert!(tag1.intersects(tag12));
        assert!(tag2.intersects(tag12));
        assert!(!tag1.intersects(tag2));
        assert!(!Tag::from_mask(0b1100).intersects(Tag::from_mask(0b0011)));
    }

    #[test]
    fn test_intersection_masks_out_of_range_bits() {
        let all = Tag::all(9);
        assert_eq!(Tag::from_mask(u32::MAX).intersection(all), all);
        assert!(Tag::from_mask(1 << 12).intersection(all).is_empty());
    }

    #[test]
    fn test_union() {
        let union = Tag::new(1).union(Tag::new(2));
        assert_eq!(union.mask(), 0b0011);
    }

    #[test]
    fn test_toggle() {
        let toggled = Tag::new(1).toggle(Tag::new(2));
        assert_eq!(toggled.mask(), 0b0011);

        let toggled_off = toggled.toggle(Tag::new(1));
        assert_eq!(toggled_off.mask(), 0b0010);

        assert!(Tag::new(3).toggle(Tag::new(3)).is_empty());
    }
}
