//! Localized user-facing strings for the chat surface.

use folio_types::chat::Language;
use folio_types::error::ChatError;

/// Maximum characters accepted in one message.
pub const MAX_MESSAGE_CHARS: usize = 1000;

pub fn rate_limited(lang: Language) -> &'static str {
    match lang {
        Language::En => "Rate limit exceeded. Please try again later.",
        Language::Pt => "Limite de taxa excedido. Tente novamente mais tarde.",
    }
}

pub fn send_failed(lang: Language) -> &'static str {
    match lang {
        Language::En => "Failed to send message. Please try again.",
        Language::Pt => "Falha ao enviar mensagem. Tente novamente.",
    }
}

pub fn in_flight(lang: Language) -> &'static str {
    match lang {
        Language::En => "Please wait for the current reply.",
        Language::Pt => "Aguarde a resposta atual.",
    }
}

pub fn cancelled(lang: Language) -> &'static str {
    match lang {
        Language::En => "Request cancelled.",
        Language::Pt => "Pedido cancelado.",
    }
}

pub fn off_topic(lang: Language, first_name: &str) -> String {
    match lang {
        Language::En => format!("Off-topic question - I can only answer about {first_name}"),
        Language::Pt => format!("Pergunta fora do tópico - só posso responder sobre {first_name}"),
    }
}

pub fn daily_limit_reached(lang: Language) -> &'static str {
    match lang {
        Language::En => "Daily token limit reached. Try again tomorrow.",
        Language::Pt => "Limite diário de tokens atingido. Tente novamente amanhã.",
    }
}

pub fn tokens_remaining_label(lang: Language) -> &'static str {
    match lang {
        Language::En => "Tokens remaining",
        Language::Pt => "Tokens restantes",
    }
}

pub fn limits_hint(lang: Language) -> &'static str {
    match lang {
        Language::En => "Limit: 3 msgs/min, 10 msgs/day",
        Language::Pt => "Limite: 3 msgs/min, 10 msgs/dia",
    }
}

pub fn empty_state(lang: Language) -> &'static str {
    match lang {
        Language::En => "Start the conversation by asking a question",
        Language::Pt => "Comece a conversa fazendo uma pergunta",
    }
}

pub fn suggestions_label(lang: Language) -> &'static str {
    match lang {
        Language::En => "Suggested questions:",
        Language::Pt => "Perguntas sugeridas:",
    }
}

pub fn sending(lang: Language) -> &'static str {
    match lang {
        Language::En => "Sending",
        Language::Pt => "Enviando",
    }
}

pub fn character_count(lang: Language, count: usize) -> String {
    match lang {
        Language::En => format!("{count}/{MAX_MESSAGE_CHARS} characters"),
        Language::Pt => format!("{count}/{MAX_MESSAGE_CHARS} caracteres"),
    }
}

pub fn assistant_title(lang: Language, first_name: &str) -> String {
    match lang {
        Language::En => format!("{first_name}'s Minion"),
        Language::Pt => format!("Minion do {first_name}"),
    }
}

pub fn assistant_subtitle(lang: Language, first_name: &str) -> String {
    match lang {
        Language::En => {
            format!("Ask me anything about {first_name}'s experience, skills, and projects")
        }
        Language::Pt => format!(
            "Pergunte-me qualquer coisa sobre a experiência, habilidades e projetos do {first_name}"
        ),
    }
}

pub fn example_questions(lang: Language, first_name: &str) -> Vec<String> {
    match lang {
        Language::En => vec![
            format!("What is {first_name}'s current role?"),
            format!("What are {first_name}'s GenAI skills?"),
            format!("Tell me about {first_name}'s most recent experience"),
            format!("What certifications does {first_name} have?"),
        ],
        Language::Pt => vec![
            format!("Qual é o cargo atual do {first_name}?"),
            format!("Quais são as habilidades de GenAI do {first_name}?"),
            format!("Conte-me sobre a experiência mais recente do {first_name}"),
            format!("Quais certificações o {first_name} tem?"),
        ],
    }
}

/// The user-facing message for a failed exchange.
///
/// Rate limits get the localized notice, structured server errors are shown
/// verbatim, everything else gets the generic retry message.
pub fn failure_message(err: &ChatError, lang: Language) -> String {
    match err {
        ChatError::RateLimited => rate_limited(lang).to_string(),
        ChatError::Server { message, .. } => message.clone(),
        ChatError::Transport(_) => send_failed(lang).to_string(),
    }
}
