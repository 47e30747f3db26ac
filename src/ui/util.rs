use unsegen::base::*;
use unsegen::widget::*;

/// A single styled line of text.
pub struct Line {
    text: String,
    style: StyleModifier,
}

impl Line {
    pub fn new(text: String, style: StyleModifier) -> Self {
        Line { text, style }
    }
}

impl Widget for Line {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(self.text.chars().count()),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window).style_modifier(self.style);
        cursor.write(&self.text);
    }
}
