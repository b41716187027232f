use thiserror::Error;

/// Failures while wiring the game into its host. The per-frame core never fails.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no global `window`")]
    NoWindow,

    #[error("no document on window")]
    NoDocument,

    #[error("element #{0} not found")]
    MissingElement(String),

    #[error("element #{id} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },

    #[error("canvas has no 2d context")]
    NoContext2d,

    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GameError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GameError> for wasm_bindgen::JsValue {
    fn from(err: GameError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_element() {
        assert_eq!(GameError::MissingElement("health".into()).to_string(), "element #health not found");
        let err = GameError::WrongElementType { id: "gameCanvas".into(), expected: "canvas" };
        assert_eq!(err.to_string(), "element #gameCanvas is not a canvas");
    }
}
