use expedition_game::Phase;
use yew::prelude::*;

use crate::app::handlers::AppHandlers;
use crate::app::state::AppState;
use crate::components::board::Board;
use crate::components::config_notice::ConfigNotice;
use crate::components::finish_screen::FinishScreen;
use crate::components::question_card::QuestionCard;
use crate::components::setup_panel::SetupPanel;
use crate::components::trail_header::TrailHeader;

fn render_fatal(message: &str) -> Html {
    html! {
        <section class="fatal-panel" role="alert">
            <h1>{ "The expedition hit a snag" }</h1>
            <p>{ message.to_string() }</p>
            <p>{ "Reload the page to start a new expedition." }</p>
        </section>
    }
}

fn render_phase(state: &AppState, handlers: &AppHandlers) -> Html {
    let game = state.game();
    match game.phase {
        Phase::Setup => html! {
            <SetupPanel
                roster={(*state.roster).clone()}
                on_team_name={handlers.team_name.clone()}
                on_player_name={handlers.player_name.clone()}
                on_claim_avatar={handlers.claim_avatar.clone()}
                on_add_slot={handlers.add_slot.clone()}
                on_remove_slot={handlers.remove_slot.clone()}
                on_start={handlers.start.clone()}
            />
        },
        Phase::Playing | Phase::Question => {
            let header = html! {
                <TrailHeader
                    team_name={game.team_name.clone()}
                    maple_leaves={game.maple_leaves}
                    region_name={game.current_region().map(|r| AttrValue::from(r.name))}
                    live={state.providers.is_live()}
                />
            };
            let card = match (game.current_question.as_ref(), game.current_player()) {
                (Some(question), Some(player)) if game.phase == Phase::Question => html! {
                    <QuestionCard
                        key={question.id.clone()}
                        question={question.clone()}
                        player_name={player.name.clone()}
                        on_answer={handlers.answer.clone()}
                    />
                },
                _ => Html::default(),
            };
            html! {
                <>
                    { header }
                    if game.phase == Phase::Question {
                        { card }
                    } else {
                        <Board
                            state={game.clone()}
                            on_roll={handlers.roll.clone()}
                            on_retry={handlers.retry_question.clone()}
                        />
                    }
                </>
            }
        }
        Phase::Finished => html! {
            <FinishScreen
                team_name={game.team_name.clone()}
                maple_leaves={game.maple_leaves}
                players={game.players.clone()}
                on_new_expedition={handlers.new_expedition.clone()}
            />
        },
    }
}

pub fn render_app(state: &AppState) -> Html {
    let handlers = AppHandlers::new(state);

    let main_view = if let Some(fatal) = state.store.fatal.as_deref() {
        render_fatal(fatal)
    } else if let Some(problem) = state.providers.problem().filter(|_| state.needs_config_notice()) {
        html! {
            <ConfigNotice
                problem={problem.to_string()}
                on_continue={handlers.continue_offline.clone()}
            />
        }
    } else {
        render_phase(state, &handlers)
    };

    html! {
        <main id="main" role="main">
            { main_view }
            if let Some(notice) = state.store.notice.clone() {
                <p class="notice" role="status" aria-live="polite">{ notice }</p>
            }
        </main>
    }
}
