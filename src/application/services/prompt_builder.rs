use std::fmt::Write;

use crate::domain::{ChatMessage, HotelSummary, MessageRole, SearchContext, SearchParams};

use super::refinement_service::RefinementInput;
use super::search_chat_service::SearchChatRequest;

const REFINE_RULES: &str = "You are StayGenie, a friendly hotel search assistant helping a traveler refine an existing hotel search.

Rules:
- Reply in one or two short sentences.
- If the message should change the search, set \"refinedSearch\" to the complete new search query; otherwise set it to null.
- Offer at most 2 short suggestions for what the traveler might refine next.
- Respond with JSON only, exactly in this shape:
{\"response\": \"...\", \"refinedSearch\": \"...\" or null, \"suggestions\": [\"...\"]}";

const SEARCH_CHAT_RULES: &str = "You are StayGenie, a friendly hotel search assistant. Answer questions about the hotels the traveler is looking at and help them adjust their search.

Rules:
- Keep replies short and conversational (two or three sentences).
- Only use facts from the hotel list below; say so when you don't know.
- If the traveler wants to change their search, end your reply with [REFINE:<complete new search query>].
- Never include more than one [REFINE:...] tag.";

/// The newest `limit` user/assistant turns, oldest first.
pub fn recent_history(history: &[ChatMessage], limit: usize) -> Vec<ChatMessage> {
    let turns: Vec<&ChatMessage> = history
        .iter()
        .filter(|m| m.role != MessageRole::System && !m.content.trim().is_empty())
        .collect();
    let skip = turns.len().saturating_sub(limit);
    turns.into_iter().skip(skip).cloned().collect()
}

pub fn build_refine_messages(input: &RefinementInput, history_limit: usize) -> Vec<ChatMessage> {
    let mut system = String::from(REFINE_RULES);
    let _ = write!(system, "\n\nCurrent search: \"{}\"", input.current_search.trim());
    if let Some(context) = input.search_context.as_ref().filter(|c| !c.is_empty()) {
        system.push_str("\nSearch context:");
        write_search_context(&mut system, context);
    }

    let mut messages = vec![ChatMessage::system(system)];
    messages.extend(recent_history(&input.chat_history, history_limit));
    messages.push(ChatMessage::user(input.user_message.trim()));
    messages
}

pub fn build_search_chat_messages(
    request: &SearchChatRequest,
    history_limit: usize,
    hotel_limit: usize,
) -> Vec<ChatMessage> {
    let mut system = String::from(SEARCH_CHAT_RULES);

    if let Some(search) = request
        .current_search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let _ = write!(system, "\n\nCurrent search: \"{}\"", search);
    }

    if let Some(params) = &request.search_params {
        system.push_str("\nSearch parameters:");
        write_search_params(&mut system, params);
    }

    if request.hotel_context.is_empty() {
        system.push_str("\n\nNo hotel results are loaded yet.");
    } else {
        let shown = request.hotel_context.len().min(hotel_limit);
        let _ = write!(
            system,
            "\n\nHotels in the current results (top {} of {}):",
            shown,
            request.hotel_context.len()
        );
        for (index, hotel) in request.hotel_context.iter().take(hotel_limit).enumerate() {
            let _ = write!(system, "\n{}. {}", index + 1, describe_hotel(hotel));
        }
    }

    let mut messages = vec![ChatMessage::system(system)];
    messages.extend(recent_history(&request.conversation_history, history_limit));
    messages.push(ChatMessage::user(request.message.trim()));
    messages
}

fn write_search_context(out: &mut String, context: &SearchContext) {
    if let Some(location) = &context.location {
        let _ = write!(out, "\n- Location: {}", location);
    }
    match (&context.check_in, &context.check_out) {
        (Some(check_in), Some(check_out)) => {
            let _ = write!(out, "\n- Dates: {} to {}", check_in, check_out);
        }
        (Some(check_in), None) => {
            let _ = write!(out, "\n- Check-in: {}", check_in);
        }
        (None, Some(check_out)) => {
            let _ = write!(out, "\n- Check-out: {}", check_out);
        }
        (None, None) => {}
    }
    if context.adults.is_some() || context.children.is_some() {
        let _ = write!(
            out,
            "\n- Guests: {} adults, {} children",
            context.adults.unwrap_or(0),
            context.children.unwrap_or(0)
        );
    }
    match (context.min_budget, context.max_budget) {
        (Some(min), Some(max)) => {
            let _ = write!(out, "\n- Budget: ${:.0}-${:.0} per night", min, max);
        }
        (None, Some(max)) => {
            let _ = write!(out, "\n- Budget: up to ${:.0} per night", max);
        }
        (Some(min), None) => {
            let _ = write!(out, "\n- Budget: from ${:.0} per night", min);
        }
        (None, None) => {}
    }
    if let Some(count) = context.result_count {
        let _ = write!(out, "\n- Results currently shown: {}", count);
    }
}

fn write_search_params(out: &mut String, params: &SearchParams) {
    if let Some(location) = &params.location {
        let _ = write!(out, "\n- Location: {}", location);
    }
    if let Some(checkin) = &params.checkin {
        let _ = write!(out, "\n- Check-in: {}", checkin);
    }
    if let Some(checkout) = &params.checkout {
        let _ = write!(out, "\n- Check-out: {}", checkout);
    }
    if let Some(adults) = params.adults {
        let _ = write!(out, "\n- Adults: {}", adults);
    }
    if let Some(children) = params.children {
        let _ = write!(out, "\n- Children: {}", children);
    }
}

fn describe_hotel(hotel: &HotelSummary) -> String {
    let mut line = hotel.name.clone();

    let place: Vec<&str> = [hotel.city.as_deref(), hotel.country.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !place.is_empty() {
        let _ = write!(line, " ({})", place.join(", "));
    }
    if let Some(price) = hotel.price {
        let currency = hotel.currency.as_deref().unwrap_or("USD");
        let _ = write!(line, ", {:.0} {}/night", price, currency);
    }
    if let Some(rating) = hotel.rating {
        let _ = write!(line, ", rated {:.1}", rating);
    }
    if let Some(matched) = hotel.ai_match_percent {
        let _ = write!(line, ", {:.0}% match", matched);
    }
    if !hotel.top_amenities.is_empty() {
        let _ = write!(line, ", amenities: {}", hotel.top_amenities.join(", "));
    }
    if let Some(distance) = hotel.distance_from_search {
        let _ = write!(line, ", {:.1} km from search area", distance);
    }
    line
}
