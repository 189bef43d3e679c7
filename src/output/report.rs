use super::DisplayOutput;

const STYLESHEET: &str = r#"
    body {
      font-family: 'Inter', sans-serif;
      background: #f8fafc;
      color: #0f172a;
      margin: 0;
      padding: 2rem;
    }
    h1 {
      font-family: 'Montserrat', sans-serif;
      font-weight: 800;
      letter-spacing: -0.025em;
    }
    .pokemon-container {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(180px, 1fr));
      gap: 1.25rem;
    }
    .pokemon-card {
      border-radius: 1rem;
      padding: 1rem;
      text-align: center;
      color: #fff;
      text-shadow: 0 1px 2px rgba(0, 0, 0, 0.4);
      box-shadow: 0 4px 12px rgba(15, 23, 42, 0.15);
    }
    .pokemon-card img {
      width: 96px;
      height: 96px;
      object-fit: contain;
    }
    .pokemon-card h2 {
      margin: 0.5rem 0;
      font-size: 1.1rem;
    }"#;

/// Standalone document wrapping the rendered container. Static: the
/// filters were already applied when the fragment was built.
pub fn render_page(output: &DisplayOutput) -> Vec<u8> {
    let fragment = super::render_fragment(output);
    let count = output.cards().len();

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Mini Pokédex</title>
  <style>{STYLESHEET}
  </style>
</head>
<body>
  <header>
    <h1>Mini Pokédex</h1>
    <p class="results-total">{count} Pokémon</p>
  </header>
  <main>
    <div class="pokemon-container">{fragment}</div>
  </main>
</body>
</html>
"####
    );
    html.into_bytes()
}
