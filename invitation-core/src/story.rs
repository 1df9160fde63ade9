/// Drag distance in pixels, on either axis, past which a card is flicked away.
pub const DRAG_SENSITIVITY: f64 = 200.0;

/// A pile of photo cards. Dragging the top card far enough sends it to the
/// bottom of the pile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoStack {
    cards: Vec<String>,
}

impl PhotoStack {
    pub fn new(cards: Vec<String>) -> Self {
        Self { cards }
    }

    /// Cards from bottom to top.
    pub fn cards(&self) -> &[String] {
        &self.cards
    }

    pub fn top(&self) -> Option<&str> {
        self.cards.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Handles the end of a drag on the top card.
    pub fn release(&mut self, dx: f64, dy: f64) -> bool {
        if dx.abs() <= DRAG_SENSITIVITY && dy.abs() <= DRAG_SENSITIVITY {
            return false;
        }
        match self.cards.len() {
            0 => false,
            n => self.send_to_back(n - 1),
        }
    }

    pub fn send_to_back(&mut self, index: usize) -> bool {
        if index >= self.cards.len() {
            return false;
        }
        let card = self.cards.remove(index);
        self.cards.insert(0, card);
        true
    }
}
