//! Frontera con la vista (el DOM de la página de autoría).
//!
//! El wizard decide; la vista sólo muestra. `HeadlessView` registra todo lo
//! que el wizard le pide y sirve para tests, el binario de demo y cualquier
//! front que quiera leer el estado en lugar de recibir callbacks.
use std::collections::{BTreeMap, BTreeSet};

use challenge_domain::{ExpertiseNode, FieldValue, Skill};

use crate::api::DisplayError;
use crate::bounty::{BountyTable, ReviewSummary};
use crate::constants::REQUIRED_VIEW_ELEMENTS;
use crate::errors::FieldError;
use crate::step::WizardStep;

/// Estado de los controles de navegación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub can_retreat: bool,
    pub can_advance: bool,
    /// En el último paso se muestra "submit" en lugar de "next".
    pub show_submit: bool,
}

impl NavigationState {
    pub fn for_step(step: WizardStep) -> Self {
        Self { can_retreat: !step.is_first(),
               can_advance: !step.is_last(),
               show_submit: step.is_last() }
    }
}

pub trait WizardView {
    /// `true` si existe el elemento (selector CSS o id `#...`).
    fn has_element(&self, selector: &str) -> bool;

    /// `true` si el campo tiene su propio contenedor de error.
    fn has_error_slot(&self, field: &str) -> bool;

    /// Muestra sólo el panel del paso y actualiza el indicador.
    fn show_step(&mut self, step: WizardStep);

    fn set_navigation(&mut self, nav: NavigationState);

    /// Refleja un valor en su input. Para `Choice` y `Flags` se marcan las
    /// opciones correspondientes.
    fn set_field(&mut self, name: &str, value: &FieldValue);

    fn show_field_errors(&mut self, errors: &[FieldError]);

    fn clear_errors(&mut self);

    /// Tabla generada en el cliente: filas estructuradas y su markup.
    fn render_bounty_table(&mut self, table: &BountyTable, rows_html: &str);

    /// Reemplaza el contenedor de la tabla con el fragmento del servidor.
    fn replace_bounty_table_html(&mut self, html: &str);

    fn set_bounty_area_visible(&mut self, visible: bool);

    fn render_summary(&mut self, summary: &ReviewSummary, html: &str);

    fn show_skills(&mut self, skills: &[Skill]);

    fn show_expertise_options(&mut self, tree: &[ExpertiseNode]);

    /// Errores de servidor; la vista hace scroll hasta ellos.
    fn show_messages(&mut self, messages: &[DisplayError]);

    /// Aviso no bloqueante (p. ej. fallo de red).
    fn show_notice(&mut self, message: &str);

    fn show_fatal_banner(&mut self, message: &str);

    fn navigate(&mut self, url: &str);
}

impl<T: WizardView + ?Sized> WizardView for &mut T {
    fn has_element(&self, selector: &str) -> bool {
        (**self).has_element(selector)
    }

    fn has_error_slot(&self, field: &str) -> bool {
        (**self).has_error_slot(field)
    }

    fn show_step(&mut self, step: WizardStep) {
        (**self).show_step(step)
    }

    fn set_navigation(&mut self, nav: NavigationState) {
        (**self).set_navigation(nav)
    }

    fn set_field(&mut self, name: &str, value: &FieldValue) {
        (**self).set_field(name, value)
    }

    fn show_field_errors(&mut self, errors: &[FieldError]) {
        (**self).show_field_errors(errors)
    }

    fn clear_errors(&mut self) {
        (**self).clear_errors()
    }

    fn render_bounty_table(&mut self, table: &BountyTable, rows_html: &str) {
        (**self).render_bounty_table(table, rows_html)
    }

    fn replace_bounty_table_html(&mut self, html: &str) {
        (**self).replace_bounty_table_html(html)
    }

    fn set_bounty_area_visible(&mut self, visible: bool) {
        (**self).set_bounty_area_visible(visible)
    }

    fn render_summary(&mut self, summary: &ReviewSummary, html: &str) {
        (**self).render_summary(summary, html)
    }

    fn show_skills(&mut self, skills: &[Skill]) {
        (**self).show_skills(skills)
    }

    fn show_expertise_options(&mut self, tree: &[ExpertiseNode]) {
        (**self).show_expertise_options(tree)
    }

    fn show_messages(&mut self, messages: &[DisplayError]) {
        (**self).show_messages(messages)
    }

    fn show_notice(&mut self, message: &str) {
        (**self).show_notice(message)
    }

    fn show_fatal_banner(&mut self, message: &str) {
        (**self).show_fatal_banner(message)
    }

    fn navigate(&mut self, url: &str) {
        (**self).navigate(url)
    }
}

/// Vista sin pantalla que guarda el último estado pedido por el wizard.
#[derive(Debug, Clone, Default)]
pub struct HeadlessView {
    pub elements: BTreeSet<String>,
    pub error_slots: BTreeSet<String>,
    pub visible_step: Option<WizardStep>,
    pub navigation: NavigationState,
    pub fields: BTreeMap<String, FieldValue>,
    pub field_errors: Vec<FieldError>,
    pub bounty_table: Option<BountyTable>,
    pub bounty_table_html: String,
    pub bounty_area_visible: bool,
    pub summary: Option<ReviewSummary>,
    pub summary_html: String,
    pub skills: Vec<Skill>,
    pub expertise_tree: Vec<ExpertiseNode>,
    pub messages: Vec<DisplayError>,
    pub scrolled_to_errors: usize,
    pub notices: Vec<String>,
    pub fatal_banner: Option<String>,
    pub navigated_to: Option<String>,
}

impl HeadlessView {
    /// Vista con todos los elementos requeridos y slots de error para los
    /// campos principales.
    pub fn complete() -> Self {
        let elements = REQUIRED_VIEW_ELEMENTS.iter().map(|s| s.to_string()).collect();
        let error_slots = ["reward_type", "title", "description", "short_description", "video_url", "status", "priority"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self { elements,
               error_slots,
               ..Self::default() }
    }

    /// Quita un elemento (para simular páginas incompletas).
    pub fn without(mut self, selector: &str) -> Self {
        self.elements.remove(selector);
        self
    }

    /// Cantidad de filas visibles en la tabla de bounties.
    pub fn bounty_row_count(&self) -> usize {
        self.bounty_table.as_ref().map(|t| t.len()).unwrap_or(0)
    }
}

impl WizardView for HeadlessView {
    fn has_element(&self, selector: &str) -> bool {
        self.elements.contains(selector)
    }

    fn has_error_slot(&self, field: &str) -> bool {
        self.error_slots.contains(field)
    }

    fn show_step(&mut self, step: WizardStep) {
        self.visible_step = Some(step);
    }

    fn set_navigation(&mut self, nav: NavigationState) {
        self.navigation = nav;
    }

    fn set_field(&mut self, name: &str, value: &FieldValue) {
        self.fields.insert(name.to_string(), value.clone());
    }

    fn show_field_errors(&mut self, errors: &[FieldError]) {
        self.field_errors = errors.to_vec();
    }

    fn clear_errors(&mut self) {
        self.field_errors.clear();
        self.messages.clear();
    }

    fn render_bounty_table(&mut self, table: &BountyTable, rows_html: &str) {
        self.bounty_table = Some(table.clone());
        self.bounty_table_html = rows_html.to_string();
    }

    fn replace_bounty_table_html(&mut self, html: &str) {
        self.bounty_table_html = html.to_string();
    }

    fn set_bounty_area_visible(&mut self, visible: bool) {
        self.bounty_area_visible = visible;
    }

    fn render_summary(&mut self, summary: &ReviewSummary, html: &str) {
        self.summary = Some(summary.clone());
        self.summary_html = html.to_string();
    }

    fn show_skills(&mut self, skills: &[Skill]) {
        self.skills = skills.to_vec();
    }

    fn show_expertise_options(&mut self, tree: &[ExpertiseNode]) {
        self.expertise_tree = tree.to_vec();
    }

    fn show_messages(&mut self, messages: &[DisplayError]) {
        self.messages = messages.to_vec();
        self.scrolled_to_errors += 1;
    }

    fn show_notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn show_fatal_banner(&mut self, message: &str) {
        self.fatal_banner = Some(message.to_string());
    }

    fn navigate(&mut self, url: &str) {
        self.navigated_to = Some(url.to_string());
    }
}
