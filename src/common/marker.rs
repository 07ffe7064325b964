use super::{
    metadata::{CellKind, Corner, GridSize, MARKER_SIZE},
    palette::Color,
};

// Corner markers
//------------------------------------------------------------------------------

// Top left is a checkerboard, top right has vertical stripes, bottom left has
// horizontal stripes and bottom right has concentric rings. The rings are the
// only rotation invariant block, which is what pins the orientation.
pub fn marker_color(size: GridSize, c: usize, r: usize) -> Option<Color> {
    let m = MARKER_SIZE;
    let far = size.width() - m;
    let stripe = |d: usize| if d & 1 == 0 { Color::BLACK } else { Color::WHITE };

    let color = match size.classify(c, r) {
        CellKind::Data => return None,
        CellKind::Marker(Corner::TopLeft) => {
            if (c + r) & 1 == 0 {
                Color::WHITE
            } else {
                Color::BLACK
            }
        }
        CellKind::Marker(Corner::TopRight) => stripe(c - far),
        CellKind::Marker(Corner::BottomLeft) => stripe(r - far),
        CellKind::Marker(Corner::BottomRight) => {
            let (dc, dr) = (c - far, r - far);
            stripe(dc.min(dr).min(m - 1 - dc).min(m - 1 - dr))
        }
    };
    Some(color)
}

#[cfg(test)]
mod marker_tests {
    use super::marker_color;
    use crate::common::{metadata::GridSize, palette::Color};

    fn block(size: GridSize, c0: usize, r0: usize) -> String {
        let mut res = String::new();
        for r in r0..r0 + 3 {
            for c in c0..c0 + 3 {
                res.push(match marker_color(size, c, r) {
                    Some(Color::BLACK) => 'b',
                    Some(Color::WHITE) => 'w',
                    _ => '?',
                });
            }
            res.push('\n');
        }
        res
    }

    #[test]
    fn test_top_left() {
        assert_eq!(block(GridSize::new(10), 0, 0), "wbw\nbwb\nwbw\n");
    }

    #[test]
    fn test_top_right() {
        assert_eq!(block(GridSize::new(10), 7, 0), "bwb\nbwb\nbwb\n");
    }

    #[test]
    fn test_bottom_left() {
        assert_eq!(block(GridSize::new(10), 0, 7), "bbb\nwww\nbbb\n");
    }

    #[test]
    fn test_bottom_right() {
        assert_eq!(block(GridSize::new(10), 7, 7), "bbb\nbwb\nbbb\n");
        assert_eq!(block(GridSize::new(13), 10, 10), "bbb\nbwb\nbbb\n");
    }

    #[test]
    fn test_data_cell_has_no_marker() {
        let size = GridSize::new(10);
        assert_eq!(marker_color(size, 3, 0), None);
        assert_eq!(marker_color(size, 5, 5), None);
        assert_eq!(marker_color(size, 9, 6), None);
    }
}
