//! Trimmed copies of real listing pages, keeping only the structure the
//! site layouts depend on.

pub const ALFA_LISTING: &str = r##"
<html><body>
  <div id="topo">Alfa Leilões</div>
  <div id="principal">
    <section>Busca</section>
    <section>
      <div><div>
        <div>Data</div><div>Hora</div><div>Local</div><div>Lance</div>
        <div><ul><li>1º leilão</li><li>2º leilão</li><li><p>R$ 1,00</p></li></ul></div>
      </div></div>
    </section>
  </div>
  <div id="lotes">
    <div>
      <div>
        <h1>Leilão Judicial</h1>
        <h2 class="title-lote-leiloes">Casa em Curitiba - PR</h2>
        <div>Comitente</div>
        <div>Local</div>
        <div><span class="line-through">R$ 350.000,00</span></div>
        <div>
          <div><p>Processo</p><a href="/processo/1">0001234-56.2023.8.16.0001</a></div>
        </div>
      </div>
    </div>
    <a href="/edital/1.pdf">Baixar Edital</a>
    <a href="#" data-toggle="modal">Documentos</a>
    <div class="modal-body-doc">
      <a href="/docs/matricula.pdf">Matrícula</a>
      <a href="/docs/laudo.pdf">Laudo</a>
    </div>
    <div class="content">Casa com 3 quartos.</div>
  </div>
</body></html>
"##;

pub const ALFA_LISTING_FALLBACKS: &str = r##"
<html><body>
  <div id="topo">Alfa Leilões</div>
  <div id="principal">
    <section>Busca</section>
    <section>
      <div><div>
        <div>Data</div><div>Hora</div><div>Local</div><div>Lance</div>
        <div><ul><li>1º leilão</li><li>2º leilão</li><li><p>R$ 120.500,00</p></li></ul></div>
      </div></div>
    </section>
  </div>
  <div id="lotes">
    <div>
      <div>
        <h1>Leilão Extrajudicial</h1>
        <h2 class="title-lote-leiloes">Sala comercial</h2>
        <div>Comitente</div>
        <div>Local</div>
        <div>Sem valor de avaliação</div>
        <div>
          <div><p>Processo</p><p>5009876-11.2022.4.04.7000</p></div>
        </div>
      </div>
    </div>
  </div>
</body></html>
"##;

pub const MEGA_LISTING: &str = r##"
<html><body>
  <div>Topo</div>
  <div>Menu</div>
  <div>
    <div>Breadcrumb</div>
    <div>Alertas</div>
    <div>
      <h1 class="section-header">Terreno em Campinas/SP</h1>
      <div><div class="value">R$ 98.000,00</div></div>
      <div>
        <div>Galeria</div>
        <div><div><div>
          <div>Comitente</div>
          <div>
            <div>
              <div>Processo</div>
              <div><a href="/processo">1002003-44.2021.8.26.0114</a></div>
            </div>
          </div>
        </div></div></div>
      </div>
      <div>
        <div class="description">Terreno plano de 300m².</div>
        <div>Mapa</div>
        <div>
          <div class="batch-type">Judicial</div>
          <div>
            <a href="/fotos">Fotos</a>
            <a href="/edital/j1.pdf">Edital</a>
            <a href="/docs/laudo.pdf">Laudo</a>
            <a href="/docs/matricula.pdf">Matrícula</a>
          </div>
        </div>
      </div>
    </div>
  </div>
</body></html>
"##;

/// An Alfa results page with one card per `(status, href)`.
pub fn alfa_results(cards: &[(&str, &str)]) -> String {
    let cards: String = cards
        .iter()
        .map(|(status, href)| {
            format!(
                r#"<div class="home-leiloes-cards">
                     <div class="card-status"><p>{status}</p></div>
                     <a class="btn-card" href="{href}">Ver lote</a>
                   </div>"#
            )
        })
        .collect();
    format!(r#"<html><body><div class="cards-wrapper">{cards}</div></body></html>"#)
}

/// A Mega results page with one card per `(status, href)`.
pub fn mega_results(cards: &[(&str, &str)]) -> String {
    let cards: String = cards
        .iter()
        .map(|(status, href)| {
            format!(
                r#"<div class="col-sm-6 col-md-4 col-lg-3 col-xl-3">
                     <div class="card">
                       <div class="card-status card-status-open">{status}</div>
                       <a class="card-title" href="{href}">Imóvel</a>
                     </div>
                   </div>"#
            )
        })
        .collect();
    format!(r#"<html><body><div class="row">{cards}</div></body></html>"#)
}
