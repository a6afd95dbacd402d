//! Default entity colours, assigned cyclically by creation order.

pub const PALETTE: [&str; 9] = [
    "#FF5733", "#33FF57", "#3357FF", "#FF33F5", "#F5FF33", "#33FFF5", "#FF3333", "#33FF33",
    "#3333FF",
];

/// Palette colour for the entity with the given 1-based id
pub fn palette_color(id: u64) -> &'static str {
    let index = (id.saturating_sub(1) % PALETTE.len() as u64) as usize;
    PALETTE[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(1), "#FF5733");
        assert_eq!(palette_color(9), "#3333FF");
        assert_eq!(palette_color(10), "#FF5733");
        assert_eq!(palette_color(20), "#33FF57");
    }
}
