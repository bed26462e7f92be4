use super::face::Face;
use super::tile::{Tile, TilePresenter};
use poise::serenity_prelude::{self as serenity, CreateActionRow, CreateButton};

const BOARD_COLUMNS: usize = 4;
const HIDDEN_LABEL: &str = "❔";
const RESTART_SUFFIX: &str = "restart";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Look {
    Hidden,
    Revealed,
    Matched,
    Mismatched,
}

/// A button press decoded from its custom id.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Press {
    Tile(u32),
    Restart,
}

struct Cell {
    tile_id: u32,
    label: String,
    look: Look,
}

/// Button mirror of the board, one button per tile plus a restart row.
pub struct ButtonGrid {
    prefix: String,
    cells: Vec<Cell>,
}

impl ButtonGrid {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            cells: Vec::new(),
        }
    }

    pub fn parse(&self, custom_id: &str) -> Option<Press> {
        let rest = custom_id.strip_prefix(&self.prefix)?;
        if rest == RESTART_SUFFIX {
            return Some(Press::Restart);
        }
        rest.parse().ok().map(Press::Tile)
    }

    /// Paints the pair red until the board hides it again.
    pub fn flag_mismatch(&mut self, pair: [u32; 2]) {
        for cell in &mut self.cells {
            if pair.contains(&cell.tile_id) {
                cell.look = Look::Mismatched;
            }
        }
    }

    #[cfg(test)]
    pub fn look(&self, tile_id: u32) -> Option<Look> {
        self.cell(tile_id).map(|cell| cell.look)
    }

    pub fn rows(&self) -> Vec<CreateActionRow> {
        let mut rows: Vec<CreateActionRow> = self
            .cells
            .chunks(BOARD_COLUMNS)
            .map(|chunk| {
                CreateActionRow::Buttons(chunk.iter().map(|cell| self.button(cell)).collect())
            })
            .collect();

        rows.push(CreateActionRow::Buttons(vec![
            CreateButton::new(format!("{}{}", self.prefix, RESTART_SUFFIX))
                .label("🔄 Recomeçar")
                .style(serenity::ButtonStyle::Secondary),
        ]));
        rows
    }

    fn button(&self, cell: &Cell) -> CreateButton {
        let button = CreateButton::new(format!("{}{}", self.prefix, cell.tile_id));
        match cell.look {
            Look::Hidden => button
                .label(HIDDEN_LABEL)
                .style(serenity::ButtonStyle::Primary),
            Look::Revealed => button
                .label(&cell.label)
                .style(serenity::ButtonStyle::Secondary)
                .disabled(true),
            Look::Matched => button
                .label(&cell.label)
                .style(serenity::ButtonStyle::Success)
                .disabled(true),
            Look::Mismatched => button
                .label(&cell.label)
                .style(serenity::ButtonStyle::Danger)
                .disabled(true),
        }
    }

    #[cfg(test)]
    fn cell(&self, tile_id: u32) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.tile_id == tile_id)
    }

    fn cell_mut(&mut self, tile_id: u32) -> Option<&mut Cell> {
        self.cells.iter_mut().find(|cell| cell.tile_id == tile_id)
    }
}

fn look_of(tile: &Tile<Face>) -> Look {
    if tile.matched {
        Look::Matched
    } else if tile.revealed {
        Look::Revealed
    } else {
        Look::Hidden
    }
}

impl TilePresenter<Face> for ButtonGrid {
    fn lay_out(&mut self, tiles: &[Tile<Face>]) {
        self.cells = tiles
            .iter()
            .map(|tile| Cell {
                tile_id: tile.id,
                label: tile.value.label(),
                look: look_of(tile),
            })
            .collect();
    }

    fn show_revealed(&mut self, tile: &Tile<Face>) {
        if let Some(cell) = self.cell_mut(tile.id) {
            cell.look = look_of(tile);
        }
    }

    fn show_matched(&mut self, tile: &Tile<Face>) {
        if let Some(cell) = self.cell_mut(tile.id) {
            cell.look = look_of(tile);
        }
    }
}
