pub(super) static STRINGS: &[(&str, &str)] = &[
    ("amount", "Cantidad"),
    ("avatar", "Avatar"),
    ("avatarbust", "Busto"),
    ("avatarbuy", "Comprar"),
    ("avatarnotuse", "No puede usar este avatar"),
    ("avatarowned", "Ya tienes este avatar"),
    ("avatars", "Avatares"),
    ("avatartype_normal", "Normal"),
    ("avatartype_user", "Para usuario específico"),
    ("avatarused", "Avatar asignado"),
    ("badges", "Logros"),
    ("benefits", "Beneficios"),
    ("blocksettings", "Configuración del bloque"),
    ("bought", "Comprado"),
    ("cannotchangeprofiletoother", "No puede cambiar el perfil de otro usuario"),
    ("changessaved", "Cambios guardados"),
    ("coins", "Monedas"),
    ("configheader_modules", "Puntos por finalizar módulos del curso"),
    ("configmodules_help", "Asigne puntos a las actividades que deben ser consideradas."),
    ("contacts", "Contactos"),
    ("currentlevel", "Tu nivel actual es <strong>{$a}</strong>"),
    ("customtitle", "Título personalizado"),
    ("deliveredcoins", "Monedas entregadas"),
    ("dynamic_help-coinsbypoints", "<strong>{$a} monedas</strong>."),
    ("dynamic_help-noactivities", "No hay actividades que asignen puntos en este curso."),
    (
        "dynamic_help-pointsbyday",
        "¡Cuida tu racha! después de que inicies una, ganarás <strong>{$a} puntos cada día</strong>.",
    ),
    ("dynamic_help-pointsbyendcourse", "Gana <strong>{$a} puntos</strong> por finalizar un curso."),
    (
        "dynamic_help-pointsbyendcourseduration",
        "Gana <strong>{$a} puntos</strong> al finalizar este curso.",
    ),
    (
        "dynamic_help-pointsbyendcourseduration_site",
        "Gana <strong>{$a}*X puntos</strong> al finalizar un curso, donde <strong>X</strong> es la duración recomendada del curso.",
    ),
    (
        "dynamic_help-pointsbyendmodule",
        "Obtén <strong>{$a} puntos</strong> por cada recurso que finalices en este curso.",
    ),
    ("dynamic_help-pointsbymodule", "{$a} puntos"),
    ("dynamic_help-pointsrecurrentlogin", "y ganar <strong>{$a} puntos</strong>."),
    (
        "dynamic_help-pointstocoins",
        "Cada que consigas <strong>{$a} puntos</strong> se te otorgarán ",
    ),
    (
        "dynamic_help-recurrentlogindays",
        "Ingresa <strong>{$a} días</strong> para iniciar una racha ",
    ),
    ("dynamic_help_title", "Obtén puntos por los siguientes criterios"),
    ("dynamichelps", "Pestaña Ayuda"),
    ("edit", "Editar"),
    ("editnickname", "Editar el alias"),
    ("errornotavatardata", "No hay datos del avatar"),
    ("errornotticketdata", "No hay datos del beneficio"),
    ("generalexceptionmessage", "Se produjo un error inesperado"),
    ("given", "Beneficio regalado"),
    (
        "helptitle_pointsbycoursemodule",
        "Este curso da puntos por completar los siguientes recursos:",
    ),
    ("improvecriteria_ncourses", "Finalización de N cursos"),
    ("improvecriteria_ncourses_label", "Finalización de {$a} cursos"),
    ("insufficientcoins", "Monedas insuficientes"),
    ("invalidamount", "La cantidad debe ser mayor que cero"),
    ("invalidrecord", "No se puede encontrar el registro de datos en la tabla de la base de datos"),
    ("invalidusercontact", "El usuario no es un contacto válido"),
    ("labellevel", "Nivel {$a}"),
    ("levelup", "¡Sube de nivel!"),
    ("maxtickets", "Actualmente tiene la cantidad máxima de este beneficio."),
    ("newblocktitle", "Ludifica"),
    ("newnickname", "Nuevo valor para {$a}"),
    (
        "nicknameexists",
        "El alias ya está siendo usado por otro usuario, por favor elige otro alias.",
    ),
    ("nicknameunasined", "Jugador {$a}"),
    ("no", "No"),
    ("nopermissions", "Lo sentimos, pero actualmente no tiene permiso para hacer eso"),
    ("notavailable", "No disponible para comprar."),
    ("notavailabledate", "La fecha para comprar este beneficio ya pasó."),
    ("notbuy", "Error al comprar"),
    ("notcostcompliance", "Monedas insuficientes"),
    ("notgive", "Error regalando un beneficio"),
    ("notgivecoins", "Error al entregar las monedas"),
    ("nottopyet", "Aún no hay información de posiciones"),
    ("numcoins", "{$a} monedas"),
    ("numpoints", "{$a} puntos"),
    (
        "overcomelevel",
        "Obten <strong>{$a->maxpoints} puntos</strong> para alcanzar el nivel <strong>{$a->name}</strong>.",
    ),
    ("pluginname", "Ludifica"),
    ("requireloginerror", "Se requiere ingresar"),
    ("ticketnotavailable", "The beneficio no está disponible ya, quizá fue usado en otra sesión."),
    ("ticketstype_default", "Por defecto"),
    ("ticketused", "Beneficio usado"),
    ("tabcontacts", "Pesaña Contactos"),
    ("tabcontacts_help", "La información de contactos del usuario"),
    ("tablastmonth", "Pestaña Posiciones en el último mes"),
    ("tabprofile", "Pestaña Perfil"),
    ("tabprofile_help", "Todas las pestañas se habilitan si eliges esta opción."),
    ("tabtitle_contacts", "Contactos"),
    ("tabtitle_dynamichelps", "Ayuda"),
    ("tabtitle_lastmonth", "Top último mes"),
    ("tabtitle_profile", "Perfil"),
    ("tabtitle_topbycourse", "Top curso"),
    ("tabtitle_topbysite", "Top sitio"),
    ("tabtopbycourse", "Pestaña Posiciones en el curso"),
    ("tabtopbysite", "Pestaña Posiciones en el sitio"),
    ("unlimited", "Ilimitado"),
    ("userfieldsranking", "Posiciones por campos de usuario"),
    (
        "userfieldsranking_help",
        "Lista de campos de usuario para mostrar otros rankings. Use coma como separador.",
    ),
    ("yes", "Sí"),
];
