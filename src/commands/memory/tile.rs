/// Receives every visible change of a tile so the host can mirror it.
pub trait TilePresenter<V> {
    /// Called with the full ordered tile set whenever the board is (re)built.
    fn lay_out(&mut self, tiles: &[Tile<V>]);

    /// Called after a tile was shown or hidden; `tile.revealed` holds the new state.
    fn show_revealed(&mut self, tile: &Tile<V>);

    /// Called after the matched flag of a tile changed.
    fn show_matched(&mut self, tile: &Tile<V>);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tile<V> {
    pub id: u32,
    pub value: V,
    pub revealed: bool,
    pub matched: bool,
}

impl<V> Tile<V> {
    pub const fn new(id: u32, value: V) -> Self {
        Self {
            id,
            value,
            revealed: false,
            matched: false,
        }
    }

    /// Flips the tile face up or face down.
    pub fn reveal<P: TilePresenter<V> + ?Sized>(&mut self, presenter: &mut P) {
        self.revealed = !self.revealed;
        presenter.show_revealed(self);
    }

    pub fn set_matched<P: TilePresenter<V> + ?Sized>(
        &mut self,
        matched: bool,
        presenter: &mut P,
    ) {
        self.matched = matched;
        presenter.show_matched(self);
    }
}
