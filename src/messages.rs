//! User-facing message catalog
//!
//! The deployed assistant answers in French; an English catalog is kept for
//! other front ends.

use serde::{Deserialize, Serialize};

/// Catalog language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

/// Messages attached to verdicts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub empty_prompt: &'static str,
    pub repeated_request: &'static str,
    /// `{command}` is replaced by the detected utility name
    pub bash_command: &'static str,
    /// Followed by `: <link>` when a search link could be built
    pub too_simple: &'static str,
    pub non_cs_domain: &'static str,
    pub politeness: &'static str,
}

impl Messages {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Fr => Self::fr(),
            Language::En => Self::en(),
        }
    }

    pub fn fr() -> Self {
        Self {
            empty_prompt: "Le prompt ne peut pas être vide. Veuillez saisir une question ou une demande.",
            repeated_request: "Cette demande semble très similaire à celle que vous avez faite récemment. \
                Veuillez consulter l'historique de la conversation.",
            bash_command: "Il semble que votre question porte sur la commande '{command}'. \
                La page de manuel officielle (« man page ») est la meilleure source. \
                Sous Linux/macOS, essayez d'exécuter ceci dans votre terminal : man {command}",
            too_simple: "Il s'agit d'une question simple à laquelle une recherche rapide sur Internet \
                peut répondre ! Essayez de faire une recherche directe",
            non_cs_domain: "Cette demande ne semble pas avoir de rapport avec l'informatique. \
                Afin de préserver les ressources, cet assistant se concentre sur les sujets liés à l'informatique.",
            politeness: "Ajouter des salutations ou des phrases de conversation augmente le traitement \
                requis par l'IA. Pour plus d'efficacité, essayez d'aller droit au but dans vos futures demandes.",
        }
    }

    pub fn en() -> Self {
        Self {
            empty_prompt: "The prompt cannot be empty. Please enter a question or a request.",
            repeated_request: "This request looks very similar to one you made recently. \
                Please check the conversation history.",
            bash_command: "Your question seems to be about the '{command}' command. \
                Its manual page is the best reference. \
                On Linux/macOS, try running this in your terminal: man {command}",
            too_simple: "This is a simple question a quick web search can answer! Try searching directly",
            non_cs_domain: "This request does not seem to be related to computer science. \
                To save resources, this assistant focuses on computing topics.",
            politeness: "Greetings and conversational phrases add to the processing the AI has to do. \
                To be more efficient, go straight to the point in future requests.",
        }
    }

    pub fn bash_command(&self, command: &str) -> String {
        self.bash_command.replace("{command}", command)
    }

    pub fn too_simple(&self, search_link: Option<&str>) -> String {
        match search_link {
            Some(link) => format!("{} : {}", self.too_simple, link),
            None => format!("{}.", self.too_simple),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::for_language(Language::default())
    }
}
