pub enum Msg {
    SelectOption(String),
    CheckAnswer,
    FlipCard,
    ToggleExplanation,
    Next,
    Previous,
}
