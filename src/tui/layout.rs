use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Screen regions
pub struct AppLayout {
    pub search_area: Rect,
    pub results_area: Rect,
    pub details_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Search box: 3 rows (top)
    /// - Results list: 60% width (left)
    /// - Details pane: 40% width (right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search box
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical_chunks[1]);

        Self {
            search_area: vertical_chunks[0],
            results_area: horizontal_chunks[0],
            details_area: horizontal_chunks[1],
            status_area: vertical_chunks[2],
        }
    }
}

/// Centered box `percent_x` wide and `height` rows tall, clamped to `area`
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [column] =
        Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center).areas(row);
    column
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_correctly() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30));

        assert_eq!(layout.search_area.height, 3);
        assert_eq!(layout.search_area.y, 0);

        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 29);

        assert_eq!(layout.results_area.height, 26);
        assert_eq!(layout.results_area.width, 60);
        assert_eq!(layout.details_area.width, 40);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 30);
        let dialog = centered_rect(60, 8, area);

        assert_eq!(dialog.width, 60);
        assert_eq!(dialog.height, 8);
        assert_eq!(dialog.x, 20);
        assert_eq!(dialog.y, 11);
    }

    #[test]
    fn test_centered_rect_clamps_height() {
        let area = Rect::new(0, 0, 40, 5);
        let dialog = centered_rect(50, 8, area);

        assert_eq!(dialog.height, 5);
        assert!(dialog.width <= 40);
    }
}
