#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Overlay closed; only open/quit are accepted.
    Closed,
    Browse,
    Edit,
    Filter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Closed
    OpenOverlay,
    Quit,

    // Browse
    SelectNext,
    SelectPrevious,
    SwitchFocus,
    AddVariable,
    EditVariable,
    DeleteVariable,
    ToggleEnabled,
    ToggleValues,
    ToggleSystemVariables,
    CopyValue,
    EnterFilter,
    NextEnvironment,
    PreviousEnvironment,
    CloseOverlay,
    Redraw,

    // Edit
    NextField,
    PreviousField,
    InsertChar(char),
    DeleteChar,
    CommitField,
    CloseEditor,
}
