/// Operations offered by the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ViewTasks,
    AddTask,
    MarkDone,
    DeleteTask,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::ViewTasks,
        MenuAction::AddTask,
        MenuAction::MarkDone,
        MenuAction::DeleteTask,
        MenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ViewTasks => "View Tasks",
            MenuAction::AddTask => "Add Task",
            MenuAction::MarkDone => "Mark Task as Done",
            MenuAction::DeleteTask => "Delete Task",
            MenuAction::Exit => "Exit",
        }
    }

    /// Menu entry at `index`, clamped to the last entry.
    pub fn at(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_display_order() {
        let labels: Vec<_> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(
            labels,
            [
                "View Tasks",
                "Add Task",
                "Mark Task as Done",
                "Delete Task",
                "Exit"
            ]
        );
    }

    #[test]
    fn at_clamps_past_the_end() {
        assert_eq!(MenuAction::at(0), MenuAction::ViewTasks);
        assert_eq!(MenuAction::at(42), MenuAction::Exit);
    }
}
