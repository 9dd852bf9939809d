/// Character display interface

/// Write-only text display addressed in text rows (`y`) and pixel
/// columns (`x`). Nothing is ever read back from it.
pub trait Display {
    /// Blank the whole screen
    fn clear(&mut self);

    /// Blank one text row
    fn clear_line(&mut self, y: u8);

    /// Draw `text` starting at pixel column `x` of row `y`
    fn write_str(&mut self, x: u8, y: u8, text: &str);

    /// Draw a number with one decimal place at pixel column `x` of row `y`
    fn write_number(&mut self, x: u8, y: u8, value: f32);
}
