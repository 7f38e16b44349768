//! Starter content for a fresh session.

use crate::buffer::SourceBufferSet;
use crate::fragment::{FragmentKind, Variant};

pub const STARTER_HTML: &str = r#"<div class="container">
  <h1>Bonjour le Monde !</h1>
  <p>Bienvenue dans l'éditeur de code</p>
  <button onclick="changeColor()">Changer la couleur</button>
</div>"#;

pub const STARTER_CSS: &str = r#".container {
  font-family: sans-serif;
  text-align: center;
  padding: 20px;
  background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
  border-radius: 10px;
  color: white;
  margin: 20px;
  transition: background 0.5s ease;
}
h1 {
  font-size: 2.5em;
  margin-bottom: 10px;
}
button {
  background: #fff;
  color: #333;
  border: none;
  padding: 10px 20px;
  border-radius: 5px;
  cursor: pointer;
  font-size: 16px;
  margin-top: 10px;
  transition: all 0.3s;
}
button:hover {
  background: #f0f0f0;
  transform: translateY(-2px);
}"#;

pub const STARTER_JS: &str = r#"function changeColor() {
  const container = document.querySelector('.container');
  const colors = [
    'linear-gradient(135deg, #667eea 0%, #764ba2 100%)',
    'linear-gradient(135deg, #f093fb 0%, #f5576c 100%)',
    'linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)',
    'linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)'
  ];

  const randomColor = colors[Math.floor(Math.random() * colors.length)];
  container.style.background = randomColor;
}"#;

pub const STARTER_COMPONENT_HTML: &str = r#"<div id="root"></div>"#;

pub const STARTER_REACT: &str = r#"function Counter() {
  const [count, setCount] = React.useState(0);
  return (
    <div className="container">
      <h1>Bonjour React !</h1>
      <p>Vous avez cliqué {count} fois</p>
      <button onClick={() => setCount(count + 1)}>Cliquez-moi</button>
    </div>
  );
}

ReactDOM.createRoot(document.getElementById('root')).render(<Counter />);"#;

/// Buffers a new session opens with.
pub fn starter(variant: Variant) -> SourceBufferSet {
    let mut buffers = SourceBufferSet::new(variant);
    buffers.set(FragmentKind::Css, STARTER_CSS);
    match variant {
        Variant::Basic => {
            buffers.set(FragmentKind::Html, STARTER_HTML);
            buffers.set(FragmentKind::Js, STARTER_JS);
        }
        Variant::Component => {
            buffers.set(FragmentKind::Html, STARTER_COMPONENT_HTML);
            buffers.set(FragmentKind::React, STARTER_REACT);
        }
    }
    buffers
}
