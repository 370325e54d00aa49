//! Prompt templates for the assistant operations.
//!
//! All prompts are in Spanish, the language the board is used in. Inputs
//! are embedded verbatim: nothing is escaped, filtered or reordered.

use scrumboard_core::assistant::{
    TicketActivity, BLOCKED_IDLE_DAYS, BLOCKED_LABEL, RECOMMENDED_TASK_COUNT, TASK_CATEGORIES,
};

/// Sections the daily summary is asked to contain, in order.
pub const SUMMARY_SECTIONS: &[&str] = &["Avances de ayer", "Objetivos para hoy", "Bloqueos"];

/// Structured daily summary of free text.
pub fn summary_prompt(text: &str) -> String {
    let sections: String = SUMMARY_SECTIONS
        .iter()
        .map(|s| format!("- {s}\n"))
        .collect();

    format!(
        "Eres un asistente experto en síntesis de texto.\n\
         Genera un resumen estructurado en español de la siguiente entrada:\n\n\
         {text}\n\n\
         El resumen debe incluir:\n\
         {sections}\n\
         Resumen:"
    )
}

/// Render the task history as one bullet line per entry, in input order.
pub fn history_lines(history: &[String]) -> String {
    history
        .iter()
        .map(|entry| format!("- {entry}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// New task suggestions for a sprint objective, answered as `{"tareas": [...]}`.
pub fn recommend_tasks_prompt(objective: &str, history: &[String]) -> String {
    let history = history_lines(history);
    let categories = TASK_CATEGORIES.join("/");

    format!(
        "Eres un asistente de gestión de proyectos ágil experto en Scrum.\n\
         El objetivo del sprint es: \"{objective}\"\n\
         Las tareas anteriores realizadas fueron:\n\
         {history}\n\n\
         Sugiere {RECOMMENDED_TASK_COUNT} tareas nuevas con título, descripción y etiquetas ({categories})\n\
         Devuélvelas en JSON como:\n\
         {{\n  \"tareas\": [ ... ]\n}}\n\
         JSON:"
    )
}

/// One numbered line per ticket, 1-based, in input order.
pub fn ticket_lines(tickets: &[TicketActivity]) -> String {
    tickets
        .iter()
        .enumerate()
        .map(|(idx, t)| {
            format!(
                "{}. \"{}\" - Estado: {} - Días sin movimiento: {} - Etiquetas: [{}]",
                idx + 1,
                t.title,
                t.status,
                t.days_idle,
                t.labels.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Blocked-ticket analysis, answered as `{"bloqueados": [...]}`.
///
/// The blocking criteria are stated to the model; the ticket list is sent
/// whole and unfiltered.
pub fn detect_blockers_prompt(tickets: &[TicketActivity]) -> String {
    let tickets = ticket_lines(tickets);

    format!(
        "Eres un asistente experto en Scrum. Analiza las siguientes tareas activas y determina cuáles están bloqueadas.\n\
         Criterios de bloqueo:\n\
         - {BLOCKED_IDLE_DAYS} o más días sin movimiento.\n\
         - Etiqueta '{BLOCKED_LABEL}'.\n\n\
         Lista de tareas:\n\
         {tickets}\n\n\
         Devuelve JSON así:\n\
         {{\n  \"bloqueados\": [ {{ \"titulo\": ..., \"razon\": ... }} ]\n}}\n\
         JSON:"
    )
}
