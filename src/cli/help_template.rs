use indoc::indoc;

// Help text template with placeholder
pub const HELP_TEMPLATE: &str = indoc! {r#"
    Examples:
      # Writing a tile from a file
      %BINARY_NAME% 12.tiles write 2048 1361 tile.png

      # Writing a tile from stdin
      cat tile.png | %BINARY_NAME% 12.tiles write 2048 1361

      # Reading a tile
      %BINARY_NAME% 12.tiles read 2048 1361 > tile.png
      %BINARY_NAME% 12.tiles read 2048 1361 --output tile.png

      # Using a file name without a zoom number
      %BINARY_NAME% --zoom 12 world.tiles info

      # Creating empty tile files for zoom levels 0 through 10
      %BINARY_NAME% tiles/ create 0-10

      # Displaying tile file info
      %BINARY_NAME% 12.tiles info
"#};
