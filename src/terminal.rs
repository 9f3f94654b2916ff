use common::{Action, Decide, Hand};
use dialoguer::{Confirm, Input};

// Prompts on the terminal, re-asking until the answer parses
pub struct Terminal;

impl Decide for Terminal {
    type Error = dialoguer::Error;

    fn wants_hit(&mut self, _hand: &Hand) -> Result<bool, Self::Error> {
        let action = Input::<Action>::new()
            .with_prompt("(h) to hit, or (s) to stand")
            .interact_text()?;
        Ok(action == Action::Hit)
    }
}

impl Terminal {
    pub fn play_again(&self) -> Result<bool, dialoguer::Error> {
        Confirm::new()
            .with_prompt("Play another round?")
            .default(true)
            .interact()
    }
}
